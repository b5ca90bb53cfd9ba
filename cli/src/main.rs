mod error;
use error::*;

use std::{
	fs::{read, write},
	io::ErrorKind,
	path::{Path, PathBuf},
	process::ExitCode,
};

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use tribit::{fileio, find_self_reproducing_seed, format_output, parse_image, Image, Runtime, SearchOptions};

const IMAGE_EXT: &str = "tbc";

#[derive(Parser, Debug)]
#[command(name = "tribit")]
#[command(about = "Run three-register machine programs and search for self-printing seeds")]
struct Args {
	#[command(subcommand)]
	command: Command,

	/// Abort any single run after this many instructions (0 disables the limit)
	#[arg(long, global = true, default_value = "10000000")]
	max_steps: u64,

	/// More logging; repeat for more
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Disable colored output
	#[arg(long, global = true)]
	no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the program and print what it emits
	Run {
		/// Puzzle text or a .tbc image
		file: PathBuf,
		/// Log every executed instruction
		#[arg(long)]
		trace: bool,
	},
	/// Print the smallest A that makes the program print itself
	Quine {
		file: PathBuf,
		/// Evaluate candidates on a single thread
		#[arg(long)]
		sequential: bool,
	},
	/// Write a .tbc image next to the input
	Build { file: PathBuf },
	/// List the program's instructions
	Disasm { file: PathBuf },
}

fn init_logging(verbose: u8, trace: bool) {
	let default = match (verbose, trace) {
		(_, true) => "trace",
		(0, _) => "warn",
		(1, _) => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn load(file: &Path) -> CLIResult<Image> {
	let bytes = match read(file) {
		Ok(b) => b,
		Err(e) => match e.kind() {
			ErrorKind::NotFound => return Err(CLIError::NotFound(file.display().to_string())),
			_ => return Err(CLIError::ExternalError("io::Error".into(), e.to_string())),
		},
	};

	if file.extension().map_or(false, |ext| ext == IMAGE_EXT) {
		debug!(file = %file.display(), "loading image");
		fileio::de(&bytes).map_err(|e| CLIError::external("FileIOError", e))
	} else {
		let text = String::from_utf8(bytes).map_err(|e| CLIError::ExternalError("Utf8Error".into(), e.to_string()))?;
		parse_image(&text).map_err(|e| CLIError::external("ParseError", e))
	}
}

fn exec(args: Args) -> CLIResult {
	let step_limit = if args.max_steps == 0 { None } else { Some(args.max_steps) };

	match args.command {
		Command::Run { file, trace } => {
			let image = load(&file)?;
			let mut runtime = Runtime::new(image.registers, &image.program)
				.step_limit(step_limit)
				.trace(trace);
			runtime.exec().map_err(|e| CLIError::external("RuntimeError", e))?;
			let run = runtime.finish();
			debug!(steps = run.steps, a = run.registers.a, b = run.registers.b, c = run.registers.c, "halted");
			println!("{}", format_output(&run.output).bold());
		}
		Command::Quine { file, sequential } => {
			let image = load(&file)?;
			let options = SearchOptions {
				initial_b: image.registers.b,
				initial_c: image.registers.c,
				step_limit,
				parallel: !sequential,
			};
			let seed = find_self_reproducing_seed(&image.program, &options)
				.map_err(|e| CLIError::external("SearchError", e))?;
			println!("{}", seed.to_string().bold());
		}
		Command::Build { file } => {
			let image = load(&file)?;
			let code = fileio::ser(&image).map_err(|e| CLIError::external("FileIOError", e))?;
			let save_as = file.with_extension(IMAGE_EXT);
			write(&save_as, code).map_err(|e| CLIError::ExternalError("io::Error".into(), e.to_string()))?;
			println!("{} {}", "wrote".green(), save_as.display());
		}
		Command::Disasm { file } => {
			let image = load(&file)?;
			println!(
				"{} a={} b={} c={}",
				"registers".dimmed(),
				image.registers.a,
				image.registers.b,
				image.registers.c
			);
			for line in image.program.disassemble() {
				let (addr, rest) = line.split_once(": ").unwrap_or(("", line.as_str()));
				println!("{}: {}", addr.dimmed(), rest.cyan());
			}
		}
	}
	Ok(())
}

fn main() -> ExitCode {
	let args = Args::parse();
	let trace = matches!(args.command, Command::Run { trace: true, .. });
	init_logging(args.verbose, trace);
	if args.no_color {
		colored::control::set_override(false);
	}

	match exec(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{} {}", "error:".red().bold(), e);
			ExitCode::FAILURE
		}
	}
}
