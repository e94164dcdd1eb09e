use log::debug;
use memchr::memmem;

use crate::world::bytes::Cursor;
use crate::world::{Result, WorldError};

/// File-extension marker that identifies model path strings.
pub const MODEL_MARKER: &[u8] = b".p3d";
/// Largest model count accepted as plausible.
pub const MAX_MODEL_COUNT: u32 = 100_000;

/// Length-prefixed table of model file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTable {
	/// Offset of the `u32` count field.
	pub offset: usize,
	/// Model paths as stored, indexed by object `model_index`.
	pub paths: Vec<String>,
	/// Offset right after the last path terminator.
	pub end_offset: usize,
}

impl ModelTable {
	/// Find the count field offset by scanning for the first `.p3d` string.
	pub fn locate(bytes: &[u8]) -> Result<usize> {
		let marker = memmem::find(bytes, MODEL_MARKER).ok_or(WorldError::ModelTableNotFound)?;
		let string_start = memchr::memrchr(0, &bytes[..marker]).map_or(0, |nul| nul + 1);
		debug!("model table: first .p3d at offset {marker}, string starts at {string_start}");

		string_start.checked_sub(4).ok_or(WorldError::InvalidOffset {
			offset: string_start,
			len: bytes.len(),
		})
	}

	/// Locate and decode the table, leaving `cursor` after the last path.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let offset = Self::locate(cursor.bytes())?;
		cursor.seek(offset)?;

		let count = cursor.read_u32_le()?;
		if count == 0 || count > MAX_MODEL_COUNT {
			return Err(WorldError::InvalidModelCount { count, at: offset });
		}

		let mut paths = Vec::with_capacity(count as usize);
		for _ in 0..count {
			paths.push(cursor.read_cstring()?);
		}

		let end_offset = cursor.tell();
		debug!("model table: {count} paths at {offset}..{end_offset}");
		Ok(Self { offset, paths, end_offset })
	}

	/// Number of declared models.
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	/// Return `true` when the table holds no paths.
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	/// Path for `model_index`, or `None` for index 0 and out-of-range indices.
	pub fn get(&self, model_index: u32) -> Option<&str> {
		if model_index == 0 {
			return None;
		}
		self.paths.get(model_index as usize).map(String::as_str)
	}
}
