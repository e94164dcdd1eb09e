use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::world::{Extraction, Result};

/// Manifest file name inside the output directory.
pub const MANIFEST_FILE: &str = "objects-meta.json";

/// One file written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
	/// Absolute or caller-relative path.
	pub path: PathBuf,
	/// Bytes written.
	pub len: usize,
}

/// Write every category buffer and the manifest into `dir`.
///
/// Buffers are written first and the manifest last, in manifest order.
/// A failed write aborts immediately; buffers already written stay on disk
/// and, without a manifest next to them, are not a valid output set.
pub fn write_outputs(extraction: &Extraction, dir: &Path) -> Result<Vec<WrittenFile>> {
	fs::create_dir_all(dir)?;

	let mut written = Vec::with_capacity(extraction.buffers.len() + 1);
	for buffer in &extraction.buffers {
		let path = dir.join(buffer.file_name());
		let bytes = buffer.to_le_bytes();
		fs::write(&path, &bytes)?;
		debug!("wrote {} ({} bytes)", path.display(), bytes.len());
		written.push(WrittenFile { path, len: bytes.len() });
	}

	let path = dir.join(MANIFEST_FILE);
	let json = serde_json::to_vec_pretty(&extraction.manifest())?;
	fs::write(&path, &json)?;
	written.push(WrittenFile { path, len: json.len() });

	Ok(written)
}
