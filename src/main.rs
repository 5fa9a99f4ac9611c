//! CLI entry point for the wallpaper generator

use clap::Parser;
use wallgen::io::cli::{Cli, GenerationRun, init_logging};

fn main() -> wallgen::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    let mut run = GenerationRun::new(cli);
    run.process()?;
    Ok(())
}
