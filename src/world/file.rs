use std::fs;
use std::path::Path;

use log::debug;

use crate::world::bytes::Cursor;
use crate::world::{Assembler, Extraction, ModelTable, ObjectRecords, ObjectTableSpan, Result, ScanOptions, WorldHeader, locate_object_table};

/// Parsed world archive: header, model table, and the discovered object table.
pub struct WorldFile {
	/// Decoded header.
	pub header: WorldHeader,
	/// Model path table.
	pub models: ModelTable,
	/// Location of the object table.
	pub objects: ObjectTableSpan,
	bytes: Vec<u8>,
}

impl WorldFile {
	/// Read and parse an archive from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = fs::read(path)?;
		Self::from_bytes(bytes)
	}

	/// Parse an in-memory archive with default scan options.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		Self::from_bytes_with(bytes, &ScanOptions::default())
	}

	/// Parse an in-memory archive.
	pub fn from_bytes_with(bytes: Vec<u8>, opt: &ScanOptions) -> Result<Self> {
		let mut cursor = Cursor::new(&bytes);
		let header = WorldHeader::parse(&mut cursor)?;
		let models = ModelTable::read(&mut cursor)?;
		let objects = locate_object_table(&bytes, models.end_offset, opt)?;
		debug!("object table: {} records at {}..{}", objects.count, objects.offset, objects.end());

		Ok(Self {
			header,
			models,
			objects,
			bytes,
		})
	}

	/// Raw file bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Iterate the records of the object table.
	pub fn records(&self) -> Result<ObjectRecords<'_>> {
		ObjectRecords::new(&self.bytes, self.objects)
	}

	/// Classify every record and build the per-category buffers.
	pub fn extract(&self) -> Result<Extraction> {
		let mut assembler = Assembler::new(&self.models);
		for record in self.records()? {
			assembler.push(&record?);
		}
		Ok(assembler.finish(self.header.world_size))
	}
}
