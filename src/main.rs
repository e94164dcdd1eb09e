#![allow(missing_docs)]

use clap::Parser;

mod cmd;

#[derive(Parser)]
#[command(name = "wrpdoc", about = "Extract placed objects from OPRW world archives")]
struct Cli {
	#[command(flatten)]
	extract: cmd::extract::Args,
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> wrpdoc::world::Result<()> {
	let cli = Cli::parse();
	cmd::extract::run(cli.extract)
}
