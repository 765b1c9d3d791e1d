use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use xvdl::commands::{doctor, download, menu::Menu};
use xvdl::core::{bootstrap, config::Config, download::Downloader};
use xvdl::utils::console::Console;

#[derive(Parser)]
#[clap(name = "xvdl")]
#[clap(about = "Download videos from Twitter/X posts")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Post URL (e.g. https://x.com/user/status/123). Omit for the interactive menu
    url: Option<String>,
    /// Destination directory (default: descargas_twitter)
    destination: Option<PathBuf>,
    /// Quality: best, 720, 480, 360 or worst (default: best)
    quality: Option<String>,
    /// Show video information instead of downloading
    #[clap(long)]
    info: bool,
    /// Never install yt-dlp automatically
    #[clap(long)]
    no_install: bool,
    /// Check the environment and exit
    #[clap(long)]
    check: bool,
    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!(e))?;

    if cli.check {
        return doctor::check_environment(&config).map_err(|e| anyhow::anyhow!(e));
    }

    let ytdlp =
        bootstrap::ensure_extractor(&config, !cli.no_install).map_err(|e| anyhow::anyhow!(e))?;
    log::debug!("extractor: {}", ytdlp.describe());

    let downloader = Downloader::new(&ytdlp).with_output_template(config.output_template.clone());
    let mut stdout = io::stdout().lock();

    match cli.url {
        Some(url) if cli.info => {
            download::info_once(&downloader, &url, &mut stdout)?;
        }
        Some(url) => {
            download::download_once(
                &downloader,
                &config,
                &url,
                cli.destination,
                cli.quality.as_deref(),
                &mut stdout,
            )?;
        }
        None => {
            let console = Console::new(io::stdin().lock(), stdout);
            Menu::new(console, &downloader, &config).run()?;
        }
    }

    Ok(())
}
