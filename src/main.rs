#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "bonedoc", about = "Dynamic-bone setup JSON tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info {
		path: PathBuf,
	},
	Check {
		path: PathBuf,
	},
	Fmt {
		path: PathBuf,
		#[arg(long)]
		output: Option<PathBuf>,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> bonedoc::bone::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { path } => cmd::info::run(path),
		Commands::Check { path } => cmd::check::run(path),
		Commands::Fmt { path, output } => cmd::fmt::run(path, output),
	}
}
