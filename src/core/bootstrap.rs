use crate::core::config::Config;
use crate::core::ytdlp::YtDlp;
use crate::error::{Result, XvdlError};
use crate::utils::shell;
use std::path::PathBuf;
use std::process::Command;

pub const YTDLP_PACKAGE: &str = "yt-dlp";

/// Installs a package by name, blocking until done.
pub trait PackageInstaller {
    fn install(&self, package: &str) -> Result<()>;
}

/// `python -m pip install <package> -q`
pub struct PipInstaller {
    python: PathBuf,
}

impl PipInstaller {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl PackageInstaller for PipInstaller {
    fn install(&self, package: &str) -> Result<()> {
        log::info!("installing {package} with {} -m pip", self.python.display());

        let status = Command::new(&self.python)
            .args(["-m", "pip", "install", package, "-q"])
            .status()
            .map_err(|e| XvdlError::install_failed(package, format!("could not run pip: {e}")))?;

        if !status.success() {
            return Err(XvdlError::install_failed(
                package,
                format!("pip exited with {status}"),
            ));
        }

        Ok(())
    }
}

/// Finds a working yt-dlp launcher: the configured path, `yt-dlp` on PATH,
/// then the `yt_dlp` Python module.
pub fn locate(config: &Config) -> Option<YtDlp> {
    locate_with(config, |name| which::which(name).ok())
}

/// [`locate`] with the PATH search supplied by the caller.
pub fn locate_with<F>(config: &Config, on_path: F) -> Option<YtDlp>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if let Some(path) = &config.ytdlp_path {
        let launcher = YtDlp::binary(path);
        if launcher.version().is_some() {
            log::debug!("using configured yt-dlp at {}", path.display());
            return Some(launcher);
        }
        log::warn!("configured yt-dlp at {} does not run", path.display());
    }

    if let Some(path) = on_path("yt-dlp") {
        log::debug!("found yt-dlp on PATH at {}", path.display());
        return Some(YtDlp::binary(path));
    }

    let python = config
        .python
        .clone()
        .or_else(|| ["python3", "python"].iter().find_map(|name| on_path(name)))?;
    let launcher = YtDlp::python_module(python);
    launcher.version().map(|version| {
        log::debug!("using {} ({version})", launcher.describe());
        launcher
    })
}

/// Returns whatever `probe` finds; when it finds nothing, installs `package`
/// once and probes again. Install failures are returned, never retried.
pub fn ensure_available<T, P>(
    package: &str,
    probe: P,
    installer: Option<&dyn PackageInstaller>,
) -> Result<T>
where
    P: Fn() -> Option<T>,
{
    if let Some(found) = probe() {
        return Ok(found);
    }

    let installer = installer.ok_or_else(|| XvdlError::BinaryNotFound {
        name: package.to_string(),
    })?;

    println!("Instalando {package}...");
    installer.install(package)?;

    match probe() {
        Some(found) => {
            println!("{package} instalado correctamente.\n");
            Ok(found)
        }
        None => Err(XvdlError::BinaryNotFound {
            name: package.to_string(),
        }),
    }
}

/// Startup capability check for the extraction tool.
pub fn ensure_extractor(config: &Config, allow_install: bool) -> Result<YtDlp> {
    let installer = if allow_install && config.auto_install {
        config
            .python
            .clone()
            .or_else(shell::find_python)
            .map(PipInstaller::new)
    } else {
        None
    };

    if allow_install && config.auto_install && installer.is_none() {
        log::warn!("no Python interpreter found; yt-dlp cannot be installed automatically");
    }

    ensure_available(
        YTDLP_PACKAGE,
        || locate(config),
        installer.as_ref().map(|i| i as &dyn PackageInstaller),
    )
}
