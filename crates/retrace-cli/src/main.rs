//! retrace CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "retrace")]
#[command(version)]
#[command(about = "Apply text edits and emit source maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an edit script to a file
    Edit {
        /// Input file
        input: PathBuf,

        /// JSON edit script to apply
        #[arg(long)]
        script: Option<PathBuf>,

        /// Write output to FILE (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Write the source map to FILE
        #[arg(long)]
        map: Option<PathBuf>,

        /// Append the source map to the output as a data URL comment
        #[arg(long)]
        inline_map: bool,

        /// Map every character instead of every run
        #[arg(long)]
        hires: bool,

        /// Embed the original text in the source map
        #[arg(long)]
        include_content: bool,

        /// Source name recorded in the map (defaults to the input path)
        #[arg(long)]
        source: Option<String>,
    },

    /// Concatenate the sources listed in a JSON manifest
    Bundle {
        /// Bundle manifest
        manifest: PathBuf,

        /// Write output to FILE (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Write the source map to FILE
        #[arg(long)]
        map: Option<PathBuf>,

        /// Map every character instead of every run
        #[arg(long)]
        hires: bool,

        /// Embed the original texts in the source map
        #[arg(long)]
        include_content: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retrace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Edit {
            input,
            script,
            output,
            map,
            inline_map,
            hires,
            include_content,
            source,
        } => commands::edit::execute(commands::edit::EditArgs {
            input,
            script,
            output,
            map,
            inline_map,
            hires,
            include_content,
            source,
        }),
        Commands::Bundle {
            manifest,
            output,
            map,
            hires,
            include_content,
        } => commands::bundle::execute(commands::bundle::BundleArgs {
            manifest,
            output,
            map,
            hires,
            include_content,
        }),
    }
}
