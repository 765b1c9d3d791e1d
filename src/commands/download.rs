use crate::core::config::Config;
use crate::core::download::{DownloadOutcome, DownloadRequest, Downloader};
use crate::core::quality::Quality;
use crate::core::url::is_valid_post_url;
use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;

/// Non-interactive download of a single URL. Returns `None` when the URL is
/// rejected before reaching the extractor.
pub fn download_once<W: Write>(
    downloader: &Downloader<'_>,
    config: &Config,
    url: &str,
    destination: Option<PathBuf>,
    quality: Option<&str>,
    out: &mut W,
) -> Result<Option<DownloadOutcome>> {
    if !is_valid_post_url(url) {
        writeln!(out, "❌ URL inválida. Uso: xvdl <URL> [carpeta] [calidad]")?;
        return Ok(None);
    }

    let destination = destination.unwrap_or_else(|| config.default_destination.clone());
    let quality = quality.map(Quality::parse).unwrap_or_else(|| config.quality());

    let request = DownloadRequest::new(url, destination, quality);
    downloader.download(&request, out).map(Some)
}

/// Non-interactive metadata lookup.
pub fn info_once<W: Write>(downloader: &Downloader<'_>, url: &str, out: &mut W) -> Result<bool> {
    if !is_valid_post_url(url) {
        writeln!(out, "❌ URL inválida. Uso: xvdl --info <URL>")?;
        return Ok(false);
    }

    Ok(downloader.show_info(url, out)?.is_success())
}
