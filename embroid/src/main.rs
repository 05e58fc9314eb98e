use anyhow::{Context, Result};
use clap::Parser;
use libembroid::{parse_script, render_svg, Command, Turtle, DEFAULT_COLOR, DEFAULT_STEP};
use std::{
	fs::{self, File},
	io::BufWriter,
	path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compile turtle scripts into embroidery stitch plans", long_about = None)]
struct Args {
	/// Output file (stitch listing, or SVG with --svg)
	#[arg(short, long, required = true)]
	output: PathBuf,

	/// Write an SVG preview instead of a stitch listing
	#[arg(long)]
	svg: bool,

	/// Treat the input as a JSON command list instead of script text
	#[arg(long)]
	json: bool,

	/// Maximum length of a single stitched segment
	#[arg(long, default_value_t = DEFAULT_STEP)]
	step: f64,

	/// Thread color
	#[arg(long, default_value = DEFAULT_COLOR)]
	color: String,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	/// Input file
	#[arg(required = true)]
	input: PathBuf,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let default_filter = if args.verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
		.init();

	let source = fs::read_to_string(&args.input).with_context(|| format!("Failed to read {}", args.input.display()))?;

	let commands: Vec<Command> = if args.json {
		serde_json::from_str(&source).with_context(|| format!("Invalid command list: {}", args.input.display()))?
	} else {
		parse_script(&source)?
	};

	let mut turtle = Turtle::new(args.step)?;
	turtle.execute(&commands);

	info!(points = turtle.points().len(), "recorded points");

	let pattern = turtle.finish(&args.color);

	if args.svg {
		fs::write(&args.output, render_svg(&pattern))
			.with_context(|| format!("Failed to write {}", args.output.display()))?;
	} else {
		let file = File::create(&args.output).with_context(|| format!("Failed to create file: {}", args.output.display()))?;
		pattern
			.write(BufWriter::new(file))
			.with_context(|| format!("Failed to write {}", args.output.display()))?;
	}

	Ok(())
}
