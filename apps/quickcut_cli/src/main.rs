use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use quickcut_core::session::Session;
use quickcut_core::suggest::SuggestedRange;
use quickcut_render::export::Exporter;
use quickcut_render::probe::import_source;
use quickcut_render::transcode::FfmpegTranscoder;

#[derive(Parser)]
#[command(name = "quickcut", about = "Trim a source video into clips and export the result")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe a media file and print its metadata as JSON.
    Probe {
        /// Path to the media file.
        file: PathBuf,
    },
    /// Export clips cut from a source file into a single output file.
    Export {
        /// Path to the source media file.
        source: PathBuf,
        /// JSON file with an ordered array of {"start", "end"} ranges in
        /// source seconds. Omit to export the full source.
        #[arg(long)]
        clips: Option<PathBuf>,
        /// Directory for temporary per-clip segments.
        #[arg(long, default_value = "temp")]
        temp_dir: PathBuf,
        /// Directory the final export lands in.
        #[arg(long, default_value = "exports")]
        exports_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Probe { file } => {
            let source = import_source(&file)
                .with_context(|| format!("failed to probe {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&source.probe)?);
        }
        Commands::Export {
            source,
            clips,
            temp_dir,
            exports_dir,
        } => {
            let media = import_source(&source)
                .with_context(|| format!("failed to probe {}", source.display()))?;
            let source_path = media.path.clone();

            let mut session = Session::new();
            session.bind_source(media);

            if let Some(clips_path) = clips {
                let data = fs::read_to_string(&clips_path)
                    .with_context(|| format!("failed to read {}", clips_path.display()))?;
                let ranges: Vec<SuggestedRange> =
                    serde_json::from_str(&data).context("clip list is not valid JSON")?;
                session
                    .apply_suggestions(&ranges)
                    .context("clip list rejected")?;
            }

            let exporter = Exporter::new(FfmpegTranscoder, temp_dir, exports_dir);
            let output = exporter.export(&source_path, &session.timeline.clips)?;
            println!("{}", output.output_path.display());
        }
    }
    Ok(())
}
