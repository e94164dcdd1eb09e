//! Shared test helpers: synthetic OPRW archives and output readers.

use std::fs;
use std::path::Path;

/// Size of one encoded object record.
pub const RECORD_SIZE: usize = 60;
/// Structural marker stored in the last field of every record.
pub const RECORD_TAG: u32 = 0x02;

/// Filler byte for gaps; never forms a record tag.
const FILLER: u8 = 0xAA;

/// One object record to encode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
	/// Object id field.
	pub object_id: u32,
	/// Index into the model table.
	pub model_index: u32,
	/// Right row of the orientation block.
	pub right: [f32; 3],
	/// Up row of the orientation block.
	pub up: [f32; 3],
	/// Forward row of the orientation block.
	pub forward: [f32; 3],
	/// World position.
	pub position: [f32; 3],
	/// Trailing tag field.
	pub tag: u32,
}

impl Record {
	/// Identity-oriented record referencing `model_index` at `position`.
	pub fn new(model_index: u32, position: [f32; 3]) -> Self {
		Self {
			object_id: 0,
			model_index,
			right: [1.0, 0.0, 0.0],
			up: [0.0, 1.0, 0.0],
			forward: [0.0, 0.0, 1.0],
			position,
			tag: RECORD_TAG,
		}
	}

	/// Replace the right vector.
	pub fn with_right(mut self, right: [f32; 3]) -> Self {
		self.right = right;
		self
	}

	/// Replace the tag field.
	pub fn with_tag(mut self, tag: u32) -> Self {
		self.tag = tag;
		self
	}

	/// Append the 60-byte encoding to `out`.
	pub fn encode(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.object_id.to_le_bytes());
		out.extend_from_slice(&self.model_index.to_le_bytes());
		for vector in [self.right, self.up, self.forward, self.position] {
			for value in vector {
				out.extend_from_slice(&value.to_le_bytes());
			}
		}
		out.extend_from_slice(&self.tag.to_le_bytes());
	}
}

/// Encoded archive plus the offsets a parser is expected to find.
#[derive(Debug, Clone)]
pub struct Archive {
	/// Full file bytes.
	pub bytes: Vec<u8>,
	/// Offset of the model count field.
	pub models_offset: usize,
	/// Offset just after the last model path terminator.
	pub models_end: usize,
	/// Offset of the first object record.
	pub objects_offset: usize,
}

/// Builder for synthetic OPRW archives.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
	magic: [u8; 4],
	version: u32,
	app_id: u32,
	grid_fields: [u32; 5],
	cell_size: f32,
	padding: Vec<u8>,
	models: Vec<String>,
	gap: usize,
	records: Vec<Record>,
	trailer: Vec<u8>,
}

impl Default for ArchiveBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ArchiveBuilder {
	/// Version 28 archive with a 256x256 grid of 64 m cells and no tables.
	pub fn new() -> Self {
		Self {
			magic: *b"OPRW",
			version: 28,
			app_id: 0,
			grid_fields: [0, 256, 256, 0, 0],
			cell_size: 64.0,
			padding: Vec::new(),
			models: Vec::new(),
			gap: 0,
			records: Vec::new(),
			trailer: Vec::new(),
		}
	}

	/// Override the file signature.
	pub fn magic(mut self, magic: [u8; 4]) -> Self {
		self.magic = magic;
		self
	}

	/// Override the format version.
	pub fn version(mut self, version: u32) -> Self {
		self.version = version;
		self
	}

	/// Override the raw grid candidate fields.
	pub fn grid(mut self, fields: [u32; 5], cell_size: f32) -> Self {
		self.grid_fields = fields;
		self.cell_size = cell_size;
		self
	}

	/// Opaque bytes between the header and the model table.
	pub fn padding(mut self, padding: Vec<u8>) -> Self {
		self.padding = padding;
		self
	}

	/// Model path table contents.
	pub fn models<I, S>(mut self, models: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.models = models.into_iter().map(Into::into).collect();
		self
	}

	/// Filler bytes between the model table and the first record.
	pub fn gap(mut self, gap: usize) -> Self {
		self.gap = gap;
		self
	}

	/// Append one object record.
	pub fn record(mut self, record: Record) -> Self {
		self.records.push(record);
		self
	}

	/// Append object records.
	pub fn records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
		self.records.extend(records);
		self
	}

	/// Opaque bytes after the object table.
	pub fn trailer(mut self, trailer: Vec<u8>) -> Self {
		self.trailer = trailer;
		self
	}

	/// Encode the archive.
	pub fn build(&self) -> Archive {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&self.magic);
		bytes.extend_from_slice(&self.version.to_le_bytes());
		bytes.extend_from_slice(&self.app_id.to_le_bytes());
		for field in self.grid_fields {
			bytes.extend_from_slice(&field.to_le_bytes());
		}
		bytes.extend_from_slice(&self.cell_size.to_le_bytes());
		bytes.extend_from_slice(&self.padding);

		let models_offset = bytes.len();
		if !self.models.is_empty() {
			bytes.extend_from_slice(&(self.models.len() as u32).to_le_bytes());
			for model in &self.models {
				bytes.extend_from_slice(model.as_bytes());
				bytes.push(0);
			}
		}
		let models_end = bytes.len();

		bytes.resize(bytes.len() + self.gap, FILLER);
		let objects_offset = bytes.len();
		for record in &self.records {
			record.encode(&mut bytes);
		}
		bytes.extend_from_slice(&self.trailer);

		Archive {
			bytes,
			models_offset,
			models_end,
			objects_offset,
		}
	}
}

/// Filler bytes that never form a record tag.
pub fn filler(len: usize) -> Vec<u8> {
	vec![FILLER; len]
}

/// Decode a little-endian `f32` output buffer.
pub fn read_floats(path: &Path) -> Vec<f32> {
	let raw = fs::read(path).expect("output buffer readable");
	assert_eq!(raw.len() % 4, 0, "buffer length is a multiple of 4");
	raw.chunks_exact(4).map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])).collect()
}

/// Parse `objects-meta.json` from an output directory.
pub fn read_manifest(dir: &Path) -> serde_json::Value {
	let raw = fs::read(dir.join("objects-meta.json")).expect("manifest readable");
	serde_json::from_slice(&raw).expect("manifest is valid json")
}
