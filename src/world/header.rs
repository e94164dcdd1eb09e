use log::debug;

use crate::world::bytes::Cursor;
use crate::world::{Result, WorldError};

/// Raw grid-layout fields whose meaning shifts between format revisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCandidates {
	/// Five consecutive `u32` fields following the app id.
	pub fields: [u32; 5],
	/// Float field following the integer candidates (cell size in meters).
	pub cell_size: f32,
}

impl GridCandidates {
	/// Pick `(width, height)` from the candidate fields.
	///
	/// Newer revisions insert a zero field before the grid size, so a leading
	/// zero followed by two positive fields and a real cell size selects the
	/// shifted pair.
	pub fn resolve_grid_dimensions(&self) -> (u32, u32) {
		let [first, second, third, ..] = self.fields;
		if first == 0 && second > 0 && third > 0 && self.cell_size > 1.0 {
			(second, third)
		} else {
			(first, second)
		}
	}
}

/// Parsed OPRW world archive header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldHeader {
	/// File signature, always `OPRW` once parsed.
	pub magic: [u8; 4],
	/// Format revision.
	pub version: u32,
	/// Application id, recorded but unused.
	pub app_id: u32,
	/// Raw grid candidates as read.
	pub grid: GridCandidates,
	/// Resolved terrain grid width in cells.
	pub grid_width: u32,
	/// Resolved terrain grid height in cells.
	pub grid_height: u32,
	/// World meters per grid cell.
	pub cell_size: f32,
	/// World extent in meters.
	pub world_size: f32,
	/// Cursor offset right after the header.
	pub end_offset: usize,
}

impl WorldHeader {
	/// Expected file signature.
	pub const MAGIC: [u8; 4] = *b"OPRW";
	/// Bytes consumed by the header.
	pub const SIZE: usize = 36;
	/// World extent used when the grid does not yield a positive size.
	pub const FALLBACK_WORLD_SIZE: f32 = 16384.0;

	/// Parse the header at the cursor position and leave the cursor after it.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let magic = cursor.read_fixed_string(4)?;
		if magic.as_bytes() != Self::MAGIC {
			return Err(WorldError::BadMagic { magic });
		}

		let version = cursor.read_u32_le()?;
		let app_id = cursor.read_u32_le()?;

		let mut fields = [0_u32; 5];
		for field in &mut fields {
			*field = cursor.read_u32_le()?;
		}
		let cell_size = cursor.read_f32_le()?;
		let grid = GridCandidates { fields, cell_size };

		let (grid_width, grid_height) = grid.resolve_grid_dimensions();
		let world_size = world_size(grid_width, cell_size);
		debug!("header: OPRW v{version}, raw grid fields {fields:?}, cell {cell_size}, resolved {grid_width}x{grid_height}");

		Ok(Self {
			magic: Self::MAGIC,
			version,
			app_id,
			grid,
			grid_width,
			grid_height,
			cell_size,
			world_size,
			end_offset: cursor.tell(),
		})
	}
}

fn world_size(grid_width: u32, cell_size: f32) -> f32 {
	let size = grid_width as f32 * cell_size;
	if size > 0.0 { size } else { WorldHeader::FALLBACK_WORLD_SIZE }
}
