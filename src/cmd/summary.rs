use std::path::Path;

use wrpdoc::world::{Extraction, WorldFile, WrittenFile};

const MODEL_SAMPLES: usize = 5;

/// Print header and table discovery results.
pub fn print_archive(path: &Path, world: &WorldFile) {
	let header = &world.header;
	println!("path: {}", path.display());
	println!("file_size: {}", format_mb(world.bytes().len()));
	println!("version: {}", header.version);
	println!("grid: {}x{}", header.grid_width, header.grid_height);
	println!("cell_size: {}", header.cell_size);
	println!("world_size: {}", header.world_size);
	println!("models: {} (table at {})", world.models.len(), world.models.offset);
	for (index, model) in world.models.paths.iter().take(MODEL_SAMPLES).enumerate() {
		println!("  [{index}] {model}");
	}
	println!("objects: {} (table at {})", world.objects.count, world.objects.offset);
}

/// Print skip tallies and the per-category table.
pub fn print_extraction(extraction: &Extraction) {
	println!("skipped_no_model: {}", extraction.skipped.no_model);
	println!("skipped_clutter: {}", extraction.skipped.clutter);
	println!("categories:");
	for buffer in &extraction.buffers {
		println!("  {:<16} {:>10} objects  ({} models)", buffer.category.as_str(), buffer.count, buffer.models.len());
	}
	println!("  {:<16} {:>10} objects", "total", extraction.total_objects());
}

/// Print the files written to the output directory.
pub fn print_written(written: &[WrittenFile]) {
	println!("written:");
	for file in written {
		println!("  {} ({})", file.path.display(), format_mb(file.len));
	}
}

fn format_mb(len: usize) -> String {
	format!("{:.2} MB", len as f64 / (1024.0 * 1024.0))
}
