mod app;

use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;

use throwscope::analysis::{AnalysisContext, ModelStats};
use throwscope::export;
use throwscope::metadata::loader::JsonSource;

use crate::app::Cli;

#[derive(Debug, Serialize)]
struct StatsRow {
    types: usize,
    methods: usize,
    tries: usize,
    catches: usize,
    generic_catches: usize,
    specialized_catches: usize,
    throws: usize,
    finally_handlers: usize,
}

impl From<&ModelStats> for StatsRow {
    fn from(stats: &ModelStats) -> Self {
        Self {
            types: stats.types,
            methods: stats.methods,
            tries: stats.tries,
            catches: stats.catches,
            generic_catches: stats.generic_catches,
            specialized_catches: stats.specialized_catches,
            throws: stats.throws,
            finally_handlers: stats.finally_handlers,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    output: String,
    model: StatsRow,
    reference: StatsRow,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => {
            // Usage errors exit with status 1, before any analysis begins.
            let _ = err.print();
            std::process::exit(1);
        }
    };

    // Show throwscope info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.json {
        let level = if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("throwscope", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    let source = JsonSource::open(&cli.dirs).context("failed to load unit dumps")?;

    let mut ctx = AnalysisContext::new();
    ctx.analyze(&cli.name, &cli.version, &source);
    ctx.resolve_targets();

    let output = PathBuf::from(format!("{}-{}.xml", cli.name, cli.version));
    export::export_to_file(&ctx, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let stats = ctx.stats();
    let reference = ctx.reference_stats();
    if cli.json {
        let out = StatsOutput {
            output: output.display().to_string(),
            model: StatsRow::from(&stats),
            reference: StatsRow::from(&reference),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("wrote {}", output.display());
        println!("\nmodel:\n{stats}");
        println!("\nreference:\n{reference}");
    }

    Ok(())
}
