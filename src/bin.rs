use clap::Parser;
use std::path::Path;

use replayflow::{batch::generate_all_data, parser::catalog_parser::UnitCatalog, Result};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Path to the folder containing decoded replay files
    #[arg(short, long)]
    pub replays: String,

    /// Path to the output folder
    #[arg(short, long)]
    pub output: String,

    /// Path to a Yaml unit catalog overriding the builtin tables
    #[arg(short, long)]
    pub catalog: Option<String>,
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    let args = Arguments::parse();
    let catalog = match &args.catalog {
        Some(path) => UnitCatalog::from_file(Path::new(path))?,
        None => UnitCatalog::builtin(),
    };
    let summary = generate_all_data(Path::new(&args.replays), Path::new(&args.output), &catalog)?;
    for skipped in &summary.skipped {
        println!("#skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    println!("#processed: {}", summary.processed);
    println!("#manifest: {}", summary.manifest_path.display());
    Ok(())
}
