use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WorldError>;

/// Errors produced while reading, scanning, and exporting OPRW world archives.
#[derive(Debug, Error)]
pub enum WorldError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Manifest serialization failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Leading signature is not `OPRW`.
	#[error("not an OPRW world archive (magic={magic:?})")]
	BadMagic {
		/// Signature bytes as read.
		magic: String,
	},
	/// Not enough bytes remained for a requested read.
	#[error("read out of bounds at offset {at}, need {need} bytes, remaining {rem}")]
	OutOfBounds {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Seek or skip target lies outside the buffer.
	#[error("invalid offset {offset} (buffer length {len})")]
	InvalidOffset {
		/// Requested absolute offset.
		offset: usize,
		/// Buffer length.
		len: usize,
	},
	/// No `.p3d` marker was found anywhere in the buffer.
	#[error("model table not found (no .p3d strings)")]
	ModelTableNotFound,
	/// Count preceding the model paths is outside `(0, 100000]`.
	#[error("invalid model count {count} at offset {at}")]
	InvalidModelCount {
		/// Declared count.
		count: u32,
		/// Offset of the count field.
		at: usize,
	},
	/// No run of 60-byte records passed the tag and position checks.
	#[error("object table not found (searched from offset {search_from})")]
	ObjectTableNotFound {
		/// Lower bound of the candidate search.
		search_from: usize,
	},
}
