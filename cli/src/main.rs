use std::{error::Error, io::Write, str::FromStr};

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use stickercube::prelude::*;

/// Applies and inverts face turns on a 3x3x3 cube
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Use a sequence to apply on the cube
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Set the cube from a string of 54 labels (the same format as when you output the cube via the "-c"-flag)
	#[arg(long, default_value_t = String::new())]
	set: String,

	/// Apply the inverse of the sequence instead, undoing it
	#[arg(long, default_value_t = false)]
	undo: bool,

	/// Only print the inverse of the sequence
	#[arg(long, default_value_t = false)]
	invert: bool,

	/// Scramble the cube with this many random turns before the sequence
	#[arg(short, long)]
	random: Option<usize>,

	/// Output the cube as a string rather than as a net
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Check on this many random sequences that their inverse undoes them
	#[arg(long)]
	verify: Option<usize>,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Increase the log level (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

/// Logs go to stderr. RUST_LOG takes priority over the verbosity flag.
fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

/// Applies random sequences and their inverses to random cubes in parallel.
/// Returns the number of sequences which did not restore their cube.
fn verify_inverses(count: usize) -> usize {
	(0..count)
		.into_par_iter()
		.filter(|_| {
			let mut cube = FaceCube::new();
			cube.apply_turns(random_sequence(20));
			let before = cube.clone();

			let turns = random_sequence(40);
			cube.apply_turns(turns.iter().copied());
			cube.apply_turns(invert_turns(&turns));

			if cube != before {
				tracing::warn!("Inverse of {} does not undo it", format_turns(&turns));
				return true;
			}
			false
		})
		.count()
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();
	init_logging(args.verbose);

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn std::io::Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	// Check the inverses and exit
	if let Some(count) = args.verify {
		let failed = verify_inverses(count);
		writeln!(out, "{} of {} sequences restored the cube", count - failed, count)?;
		if failed > 0 {
			return Err(format!("{} sequences were not undone by their inverse", failed).into());
		}
		return Ok(());
	}

	let turns = parse_turns(&args.sequence)?;

	// Print the inverse and exit
	if args.invert {
		writeln!(out, "{}", format_turns(&invert_turns(&turns)))?;
		return Ok(());
	}

	// Parses a cube out of the cube string
	let mut cube = if args.set.is_empty() {
		FaceCube::default()
	} else {
		FaceCube::from_str(&args.set)?
	};

	if let Some(length) = args.random {
		let scramble = random_sequence(length);
		writeln!(out, "Scramble: {}", format_turns(&scramble))?;
		cube.apply_turns(scramble);
	}

	if args.undo {
		tracing::debug!("Undoing {}", args.sequence);
		cube.apply_turns(invert_turns(&turns));
	} else {
		cube.apply_turns(turns);
	}

	// Print the resulting cube (either as a string or as a net)
	if args.char_print {
		let s: String = cube.into();
		writeln!(out, "{}", s)?;
	} else {
		write!(out, "{}", cube.net())?;
	}

	Ok(())
}
