use std::path::PathBuf;

use wrpdoc::world::{Result, WorldFile, write_outputs};

use crate::cmd::summary;

#[derive(clap::Args)]
pub struct Args {
	/// OPRW world archive to read.
	#[arg(default_value = "world.wrp")]
	pub path: PathBuf,
	/// Directory receiving `objects-<category>.bin` and `objects-meta.json`.
	#[arg(long, default_value = "public")]
	pub out: PathBuf,
	/// Print the manifest as JSON instead of the text summary.
	#[arg(long)]
	pub json: bool,
	/// Parse and summarize without writing output files.
	#[arg(long = "dry-run")]
	pub dry_run: bool,
}

/// Parse an archive, classify its objects, and write per-category buffers.
pub fn run(args: Args) -> Result<()> {
	let Args { path, out, json, dry_run } = args;

	let world = WorldFile::open(&path)?;
	let extraction = world.extract()?;

	if !json {
		summary::print_archive(&path, &world);
		summary::print_extraction(&extraction);
	}

	if !dry_run {
		let written = write_outputs(&extraction, &out)?;
		if !json {
			summary::print_written(&written);
		}
	}

	if json {
		println!("{}", serde_json::to_string_pretty(&extraction.manifest())?);
	}

	Ok(())
}
