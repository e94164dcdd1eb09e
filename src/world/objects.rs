use log::debug;

use crate::world::bytes::{Cursor, f32_at, u32_at};
use crate::world::{Result, WorldError};

/// Size of one encoded object record in bytes.
pub const RECORD_SIZE: usize = 60;
/// Structural marker stored in the trailing field of every record.
pub const RECORD_TAG: u32 = 0x02;

const POS_X_OFFSET: usize = 44;
const POS_Z_OFFSET: usize = 52;
const TAG_OFFSET: usize = 56;

/// Tunables for object table discovery.
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// Exclusive lower bound for a plausible x/z coordinate.
	pub coord_min: f32,
	/// Exclusive upper bound for a plausible x/z coordinate.
	pub coord_max: f32,
	/// Accepting a run longer than this ends the search.
	pub early_exit_run: usize,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			coord_min: -2000.0,
			coord_max: 20000.0,
			early_exit_run: 10_000,
		}
	}
}

impl ScanOptions {
	fn plausible(&self, value: Option<f32>) -> bool {
		value.is_some_and(|value| value.is_finite() && value > self.coord_min && value < self.coord_max)
	}
}

/// Location of the discovered object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectTableSpan {
	/// Offset of the first record.
	pub offset: usize,
	/// Number of consecutive records.
	pub count: usize,
}

impl ObjectTableSpan {
	/// Offset right after the last record.
	pub fn end(&self) -> usize {
		self.offset + self.count * RECORD_SIZE
	}
}

#[derive(Debug, Default, Clone, Copy)]
struct RunScore {
	count: usize,
	good_pos: usize,
}

/// Find the object table by scoring runs of tagged 60-byte records.
///
/// Every byte in `search_from..search_from + 60` is tried as a base, and each
/// base is walked in record-size strides. A run replaces the current best only
/// when it is strictly longer and most of its records carry plausible x/z
/// positions, so ties keep the earliest run.
pub fn locate_object_table(bytes: &[u8], search_from: usize, opt: &ScanOptions) -> Result<ObjectTableSpan> {
	let mut best: Option<ObjectTableSpan> = None;

	'bases: for base in search_from..search_from.saturating_add(RECORD_SIZE) {
		let mut start = base;
		while fits_record(bytes, start) {
			if u32_at(bytes, start + TAG_OFFSET) != Some(RECORD_TAG) {
				start += RECORD_SIZE;
				continue;
			}

			let run = score_run(bytes, start, opt);
			let best_count = best.map_or(0, |span| span.count);
			if run.count > best_count && run.good_pos * 2 > run.count {
				debug!("object table candidate: {} records at {start} ({} plausible)", run.count, run.good_pos);
				best = Some(ObjectTableSpan { offset: start, count: run.count });
				if run.count > opt.early_exit_run {
					debug!("object table: run exceeds {}, stopping search", opt.early_exit_run);
					break 'bases;
				}
			}

			start += run.count * RECORD_SIZE;
		}
	}

	best.ok_or(WorldError::ObjectTableNotFound { search_from })
}

fn fits_record(bytes: &[u8], start: usize) -> bool {
	start.checked_add(RECORD_SIZE).is_some_and(|end| end <= bytes.len())
}

fn score_run(bytes: &[u8], start: usize, opt: &ScanOptions) -> RunScore {
	let mut score = RunScore::default();
	let mut at = start;
	while fits_record(bytes, at) && u32_at(bytes, at + TAG_OFFSET) == Some(RECORD_TAG) {
		score.count += 1;
		if opt.plausible(f32_at(bytes, at + POS_X_OFFSET)) && opt.plausible(f32_at(bytes, at + POS_Z_OFFSET)) {
			score.good_pos += 1;
		}
		at += RECORD_SIZE;
	}
	score
}

/// One decoded 60-byte object placement record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectRecord {
	/// Object id, unused downstream.
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
	/// Structural marker, already validated during discovery.
	pub tag: u32,
}

impl ObjectRecord {
	/// Decode one record at the cursor position.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			object_id: cursor.read_u32_le()?,
			model_index: cursor.read_u32_le()?,
			right: cursor.read_vec3()?,
			up: cursor.read_vec3()?,
			forward: cursor.read_vec3()?,
			position: cursor.read_vec3()?,
			tag: cursor.read_u32_le()?,
		})
	}
}

/// Iterator over the records of a discovered object table.
pub struct ObjectRecords<'a> {
	cursor: Cursor<'a>,
	left: usize,
	done: bool,
}

impl<'a> ObjectRecords<'a> {
	/// Create an iterator positioned at `span.offset`.
	pub fn new(bytes: &'a [u8], span: ObjectTableSpan) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);
		cursor.seek(span.offset)?;
		Ok(Self {
			cursor,
			left: span.count,
			done: false,
		})
	}
}

impl Iterator for ObjectRecords<'_> {
	type Item = Result<ObjectRecord>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.left == 0 {
			return None;
		}

		self.left -= 1;
		match ObjectRecord::parse(&mut self.cursor) {
			Ok(record) => Some(Ok(record)),
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		if self.done { (0, Some(0)) } else { (0, Some(self.left)) }
	}
}
