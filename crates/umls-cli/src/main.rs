//! UMLS table builder binary.
//!
//! Reads a META directory and writes concept, term and string
//! collections as JSON lines.

mod progress;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umls_loader::{
    BuildConfig, Identity, JsonlSink, ProgressUnit, SinkConfig, StripMarkup, TableBuilder,
};

use crate::progress::BarProgress;

#[derive(Parser, Debug)]
#[command(name = "umls-build", version, about = "Build UMLS concept, term and string collections from RRF files")]
struct Cli {
    /// META directory, or a release root containing META/
    #[arg(long, env = "UMLS_META_DIR")]
    meta_dir: PathBuf,

    /// Vocabulary language codes to keep, e.g. ENG,DUT (default: all atoms, no definitions)
    #[arg(short, long = "language", env = "UMLS_LANGUAGES", value_delimiter = ',')]
    languages: Vec<String>,

    /// Directory that receives the database directory
    #[arg(long, env = "UMLS_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Database name
    #[arg(long, env = "UMLS_DATABASE", default_value = "umls")]
    database: String,

    /// Documents per insert batch
    #[arg(long, default_value_t = 10_000)]
    batch_size: usize,

    /// Skip MRDEF definitions
    #[arg(long)]
    no_definitions: bool,

    /// Skip MRREL relations
    #[arg(long)]
    no_relations: bool,

    /// Skip MRSTY semantic types
    #[arg(long)]
    no_semantic_types: bool,

    /// Remove HTML markup from definitions
    #[arg(long)]
    strip_markup: bool,

    /// Count lines before each scan for line-based progress
    #[arg(long)]
    count_lines: bool,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn build_config(&self) -> BuildConfig {
        BuildConfig {
            process_definitions: !self.no_definitions,
            process_relations: !self.no_relations,
            process_semantic_types: !self.no_semantic_types,
            progress_unit: if self.count_lines {
                ProgressUnit::Lines
            } else {
                ProgressUnit::Bytes
            },
            ..BuildConfig::new(&self.meta_dir)
        }
        .with_languages(self.languages.iter().map(|code| code.trim().to_string()))
    }

    fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            output_dir: self.output_dir.clone(),
            database: self.database.clone(),
            batch_size: self.batch_size,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.build_config();
    let sink_config = cli.sink_config();

    tracing::info!("Building UMLS tables from: {}", config.meta_dir.display());
    if config.languages.is_empty() {
        tracing::info!("Keeping atoms of every language; no definitions");
    } else {
        tracing::info!("Keeping languages: {:?}", config.languages);
    }

    let mut sink = JsonlSink::open(&sink_config)?;
    tracing::info!("Writing collections to: {}", sink.dir().display());

    let builder = TableBuilder::new(config).with_progress(BarProgress::new(cli.quiet));
    let builder = if cli.strip_markup {
        builder.with_preprocessor(StripMarkup)
    } else {
        builder.with_preprocessor(Identity)
    };
    let tables = builder.build(&mut sink)?;

    tracing::info!(
        "Built {} concepts, {} terms, {} strings",
        tables.concepts.len(),
        tables.terms.len(),
        tables.strings.len()
    );

    let written = tables.write_to(&mut sink, sink_config.batch_size)?;
    sink.flush()?;
    tracing::info!("Wrote {} documents", written);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["umls-build", "--meta-dir", "/data/META"]).unwrap();
        let config = cli.build_config();

        assert_eq!(config.meta_dir, PathBuf::from("/data/META"));
        assert!(config.languages.is_empty());
        assert!(config.process_definitions);
        assert!(config.process_relations);
        assert!(config.process_semantic_types);
        assert_eq!(config.progress_unit, ProgressUnit::Bytes);

        let sink = cli.sink_config();
        assert_eq!(sink.database, "umls");
        assert_eq!(sink.batch_size, 10_000);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "umls-build",
            "--meta-dir",
            "/data/META",
            "--language",
            "ENG,DUT",
            "-l",
            "ENG",
            "--no-relations",
            "--count-lines",
            "--database",
            "umls2024",
        ])
        .unwrap();
        let config = cli.build_config();

        assert_eq!(config.languages.len(), 2);
        assert!(config.languages.contains("DUT"));
        assert!(!config.process_relations);
        assert!(config.process_definitions);
        assert_eq!(config.progress_unit, ProgressUnit::Lines);
        assert_eq!(cli.sink_config().database_dir(), PathBuf::from("./umls2024"));
    }
}
