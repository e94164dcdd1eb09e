mod assemble;
mod bytes;
mod classify;
mod error;
mod file;
mod header;
mod models;
mod objects;
mod output;

/// Per-category accumulation, extraction result, and manifest types.
pub use assemble::{Assembler, CategoryBuffer, CategoryEntry, ClassifiedPoint, Extraction, MAX_MODEL_SAMPLES, Manifest, SkipStats};
/// Bounded little-endian byte cursor.
pub use bytes::Cursor;
/// Category rules, species sub-classification, and yaw derivation.
pub use classify::{CATEGORY_RULES, Category, ModelClass, Pattern, Species, basename, classify_model, classify_path, classify_species, yaw_degrees};
/// Error and result aliases.
pub use error::{Result, WorldError};
/// Parsed archive session.
pub use file::WorldFile;
/// Header representation and grid resolution.
pub use header::{GridCandidates, WorldHeader};
/// Model path table locator and reader.
pub use models::{MAX_MODEL_COUNT, MODEL_MARKER, ModelTable};
/// Object table discovery and record decoding.
pub use objects::{ObjectRecord, ObjectRecords, ObjectTableSpan, RECORD_SIZE, RECORD_TAG, ScanOptions, locate_object_table};
/// Output file writer.
pub use output::{MANIFEST_FILE, WrittenFile, write_outputs};
