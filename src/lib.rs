//! Public library API for extracting placed objects from OPRW world archives.

/// World archive parsing, table discovery, classification, and output assembly.
pub mod world;
