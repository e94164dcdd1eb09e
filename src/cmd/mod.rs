/// Archive parse, classify, and export command.
pub mod extract;
/// Human-readable progress and summary printing.
pub mod summary;
