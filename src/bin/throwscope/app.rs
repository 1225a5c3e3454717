use std::path::PathBuf;

use clap::Parser;

/// throwscope - exception-flow and call-site model extraction for compiled JVM programs
#[derive(Debug, Parser)]
#[command(name = "throwscope", version, about, long_about = None)]
pub struct Cli {
    /// Project name; also names the main assembly and the output file.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Project version string.
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// One or more directories containing the compiled program's unit dumps.
    #[arg(value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,

    /// Emit statistics as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}
