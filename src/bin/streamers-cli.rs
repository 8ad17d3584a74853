use clap::{Parser, Subcommand};
use std::path::PathBuf;

use points_watcher::config::StreamersConfig;
use points_watcher::health::HEALTH_PATH;
use points_watcher::streamers::{preview_streamers, StreamerId};

#[derive(Parser)]
#[command(name = "streamers-cli")]
#[command(about = "Operator tools for the channel points watcher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the list the watcher would load from a streamer file (read-only)
    Check {
        /// Streamer file; a missing file is reported, not created
        #[arg(short, long, default_value = "streamers.csv")]
        file: PathBuf,

        /// Streamer used when the file has no valid entries
        #[arg(short, long)]
        default: Option<String>,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Query a running watcher's health endpoint
    Health {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, default, json } => {
            let default = default.unwrap_or_else(|| StreamersConfig::default().default_streamer);
            let default = StreamerId::parse(&default)?;

            let preview = preview_streamers(&file, &default)?;
            if preview.missing {
                eprintln!(
                    "{} does not exist; the watcher will create it with {:?}",
                    file.display(),
                    default.as_str()
                );
            }
            for token in &preview.rejected {
                eprintln!("Ignored invalid streamer: {:?}", token);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&preview.list)?);
            } else {
                for id in preview.list.iter() {
                    println!("{}", id);
                }
            }
        }
        Commands::Health { url } => {
            let res = reqwest::get(format!("{}{}", url.trim_end_matches('/'), HEALTH_PATH)).await?;
            let status = res.status();
            let body = res.text().await?;
            if !status.is_success() {
                eprintln!("Error: health endpoint returned status {}", status);
                std::process::exit(1);
            }
            println!("{} {}", status, body);
        }
    }

    Ok(())
}
