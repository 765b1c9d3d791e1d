use crate::core::bootstrap;
use crate::core::config::{get_config_path, Config};
use crate::error::Result;
use crate::utils::{fs, shell};

/// Prints what xvdl would use on this machine. Nothing is installed.
pub fn check_environment(config: &Config) -> Result<()> {
    println!("🔍 xvdl - Environment Check");
    println!();

    let mut issues_found = 0;

    println!("📁 Configuration:");
    let config_path = get_config_path()?;
    if config_path.exists() {
        println!("  config file: {}", config_path.display());
    } else {
        println!("  config file: {} (not present, using defaults)", config_path.display());
    }
    println!(
        "  default destination: {}",
        fs::display_absolute(&config.default_destination)
    );
    println!("  default quality: {}", config.quality());
    println!("  output template: {}", config.output_template);
    println!();

    println!("🐍 Python:");
    match config.python.clone().or_else(shell::find_python) {
        Some(python) => println!("  ✅ {}", python.display()),
        None => {
            println!("  ⚠️  no Python interpreter found (automatic install unavailable)");
        }
    }
    println!();

    println!("🎬 yt-dlp:");
    match bootstrap::locate(config) {
        Some(launcher) => {
            let version = launcher.version().unwrap_or_else(|| "unknown".to_string());
            println!("  ✅ {} ({version})", launcher.describe());
        }
        None => {
            println!("  ❌ not found");
            issues_found += 1;
        }
    }
    println!();

    if issues_found == 0 {
        println!("🎉 Environment looks good! No issues found.");
    } else {
        println!("⚠️  Found {issues_found} issue(s) that need attention.");
        println!();
        println!("💡 To fix issues:");
        println!("  - Run 'xvdl' once to install yt-dlp automatically");
        println!("  - Or install it yourself: python3 -m pip install yt-dlp");
        println!("  - Or point XVDL_YTDLP at an existing yt-dlp binary");
    }

    Ok(())
}
