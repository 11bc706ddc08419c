use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jenkins_update_center::logging::{LogFormat, init_logging};
use jenkins_update_center::lts::{resolve_update_line, supported_lines};
use jenkins_update_center::{UpdateCenter, UpdateCenterConfig};

#[derive(Parser)]
#[command(name = "jenkins-update-center")]
#[command(version, about = "Fetch the plugin update-center manifest for a Jenkins version")]
struct Cli {
    /// JSON config file (tempDir, baseUrl, keepDownloads)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the manifest and print its JSON payload
    Fetch {
        /// Jenkins version, e.g. 2.107.3
        version: String,

        /// Directory for the downloaded file
        #[arg(long)]
        temp_dir: Option<PathBuf>,

        /// Mirror root to download from
        #[arg(long)]
        base_url: Option<String>,

        /// Leave the downloaded file on disk
        #[arg(long)]
        keep: bool,
    },
    /// Print the update line a Jenkins version resolves to
    Resolve { version: String },
    /// List the supported update lines, newest first
    Lines,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref(), cli.log_format)?;

    let mut config = match &cli.config {
        Some(path) => UpdateCenterConfig::from_file(path)?,
        None => UpdateCenterConfig::default(),
    };

    match cli.command {
        Command::Fetch {
            version,
            temp_dir,
            base_url,
            keep,
        } => {
            if let Some(temp_dir) = temp_dir {
                config.temp_dir = Some(temp_dir);
            }
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            config.keep_downloads |= keep;

            let json = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?
                .block_on(UpdateCenter::new(config).fetch_manifest_for(&version))?;
            println!("{json}");
        }
        Command::Resolve { version } => {
            println!("{}", resolve_update_line(&version)?);
        }
        Command::Lines => {
            for line in supported_lines() {
                println!("{line}");
            }
        }
    }

    Ok(())
}
