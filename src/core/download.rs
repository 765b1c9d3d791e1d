use crate::core::config::DEFAULT_OUTPUT_TEMPLATE;
use crate::core::extractor::{ExtractOptions, Extractor};
use crate::core::info::{self, VideoInfo};
use crate::core::quality::Quality;
use crate::error::{ExtractError, Outcome, Result};
use crate::utils::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One download: which post, where to, at what quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
    pub quality: Quality,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>, quality: Quality) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            quality,
        }
    }
}

pub type DownloadOutcome = Outcome<PathBuf>;

/// Runs download and info lookups through an [`Extractor`], reporting
/// progress and results to `out`.
pub struct Downloader<'a> {
    extractor: &'a dyn Extractor,
    output_template: String,
}

impl<'a> Downloader<'a> {
    pub fn new(extractor: &'a dyn Extractor) -> Self {
        Self {
            extractor,
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
        }
    }

    /// File name template, relative to the destination directory.
    pub fn with_output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = template.into();
        self
    }

    fn download_options(&self, destination: &Path, quality: Quality) -> ExtractOptions {
        ExtractOptions {
            format: Some(quality.format_selector().to_string()),
            output_template: Some(
                destination
                    .join(&self.output_template)
                    .to_string_lossy()
                    .into_owned(),
            ),
            quiet: false,
            no_warnings: false,
            show_progress: true,
        }
    }

    /// Downloads one post. The destination directory is created if needed.
    /// Failures are reported to `out` and returned as an outcome; only
    /// console write errors are returned as `Err`.
    pub fn download<W: Write>(
        &self,
        request: &DownloadRequest,
        out: &mut W,
    ) -> Result<DownloadOutcome> {
        if let Err(e) = fs::ensure_dir_exists(&request.destination) {
            log::warn!("cannot create {}: {e}", request.destination.display());
            writeln!(out, "\n❌ Error inesperado: {e}")?;
            return Ok(Outcome::UnknownFailure(e.to_string()));
        }

        writeln!(out, "\n Descargando video...")?;
        writeln!(out, "   URL: {}", request.url)?;
        writeln!(out, "   Destino: {}", fs::display_absolute(&request.destination))?;
        writeln!(out, "   Calidad: {}\n", request.quality)?;
        out.flush()?;

        let options = self.download_options(&request.destination, request.quality);

        match self.extractor.extract(&request.url, &options, true) {
            Ok(info) => {
                let path = self.extractor.prepare_filename(&info, &options);
                log::debug!("downloaded {} to {}", request.url, path.display());
                writeln!(out, "\n✅ Video descargado exitosamente!")?;
                writeln!(out, "   Archivo: {}", path.display())?;
                Ok(Outcome::Success(path))
            }
            Err(ExtractError::Download(reason)) => {
                log::warn!("{} could not download {}: {reason}", self.extractor.name(), request.url);
                writeln!(out, "\n❌ Error al descargar: {reason}")?;
                writeln!(out, "   Asegúrate de que el tweet sea público y contenga un video.")?;
                Ok(Outcome::KnownFailure(reason))
            }
            Err(ExtractError::Unexpected(message)) => {
                log::warn!("{} failed on {}: {message}", self.extractor.name(), request.url);
                writeln!(out, "\n❌ Error inesperado: {message}")?;
                Ok(Outcome::UnknownFailure(message))
            }
        }
    }

    /// Metadata-only lookup: prints title, author, duration, upload date and
    /// the available resolutions. Nothing is downloaded.
    pub fn show_info<W: Write>(&self, url: &str, out: &mut W) -> Result<Outcome<VideoInfo>> {
        writeln!(out, "\n Obteniendo información del video...")?;
        out.flush()?;

        let info = match self
            .extractor
            .extract(url, &ExtractOptions::metadata_only(), false)
        {
            Ok(info) => info,
            Err(e) => {
                log::warn!("{} could not read {url}: {e}", self.extractor.name());
                writeln!(out, "❌ No se pudo obtener información: {e}")?;
                return Ok(e.into());
            }
        };

        let primary = info.primary();
        writeln!(out, "\n Información del video:")?;
        writeln!(out, "   Título:    {}", info::or_na(primary.title.as_deref()))?;
        writeln!(out, "   Usuario:   {}", info::or_na(primary.uploader.as_deref()))?;
        writeln!(out, "   Duración:  {}", info::format_duration(primary.duration))?;
        writeln!(
            out,
            "   Fecha:     {}",
            info::format_upload_date(primary.upload_date.as_deref())
        )?;

        let heights = info.available_heights();
        if !heights.is_empty() {
            let listed: Vec<String> = heights.iter().map(|h| format!("{h}p")).collect();
            writeln!(out, "   Calidades: {}", listed.join(", "))?;
        }

        Ok(Outcome::Success(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Returns a canned result and records the options it was called with.
    struct Canned {
        result: std::result::Result<VideoInfo, ExtractError>,
        calls: RefCell<Vec<(String, ExtractOptions, bool)>>,
    }

    impl Canned {
        fn new(result: std::result::Result<VideoInfo, ExtractError>) -> Self {
            Self {
                result,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Extractor for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn extract(
            &self,
            url: &str,
            options: &ExtractOptions,
            download: bool,
        ) -> std::result::Result<VideoInfo, ExtractError> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), options.clone(), download));
            self.result.clone()
        }
    }

    fn tweet() -> VideoInfo {
        VideoInfo {
            id: Some("42".into()),
            title: Some("Clip".into()),
            uploader: Some("someone".into()),
            duration: Some(30.0),
            upload_date: Some("20240101".into()),
            ext: Some("mp4".into()),
            ..VideoInfo::default()
        }
    }

    #[test]
    fn test_download_success_reports_path() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("out");
        let extractor = Canned::new(Ok(tweet()));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .download(
                &DownloadRequest::new("https://x.com/u/status/42", &dest, Quality::P720),
                &mut out,
            )
            .unwrap();

        assert_eq!(outcome, Outcome::Success(dest.join("someone_42.mp4")));
        assert!(dest.is_dir());

        let calls = extractor.calls.borrow();
        let (_, options, download) = &calls[0];
        assert!(*download);
        assert_eq!(options.format.as_deref(), Some("best[height<=720]"));
        assert_eq!(
            options.output_template.as_deref().map(PathBuf::from),
            Some(dest.join("%(uploader)s_%(id)s.%(ext)s"))
        );

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Calidad: 720"));
        assert!(printed.contains("✅ Video descargado exitosamente!"));
    }

    #[test]
    fn test_download_failure_gives_hint() {
        let temp = tempfile::tempdir().unwrap();
        let extractor = Canned::new(Err(ExtractError::Download("No video".into())));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .download(
                &DownloadRequest::new("https://x.com/u/status/1", temp.path(), Quality::Best),
                &mut out,
            )
            .unwrap();

        assert_eq!(outcome, Outcome::KnownFailure("No video".into()));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("❌ Error al descargar: No video"));
        assert!(printed.contains("sea público"));
    }

    #[test]
    fn test_unexpected_failure_is_generic() {
        let temp = tempfile::tempdir().unwrap();
        let extractor = Canned::new(Err(ExtractError::Unexpected("crash".into())));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .download(
                &DownloadRequest::new("https://x.com/u/status/1", temp.path(), Quality::Best),
                &mut out,
            )
            .unwrap();

        assert_eq!(outcome, Outcome::UnknownFailure("crash".into()));
        assert!(String::from_utf8(out).unwrap().contains("❌ Error inesperado: crash"));
    }

    #[test]
    fn test_uncreatable_destination_skips_extractor() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let extractor = Canned::new(Ok(tweet()));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .download(
                &DownloadRequest::new("https://x.com/u/status/1", &blocker, Quality::Best),
                &mut out,
            )
            .unwrap();

        assert!(matches!(outcome, Outcome::UnknownFailure(_)));
        assert!(extractor.calls.borrow().is_empty());
    }

    #[test]
    fn test_custom_output_template() {
        let temp = tempfile::tempdir().unwrap();
        let extractor = Canned::new(Ok(tweet()));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .with_output_template("%(id)s.%(ext)s")
            .download(
                &DownloadRequest::new("https://x.com/u/status/42", temp.path(), Quality::Best),
                &mut out,
            )
            .unwrap();

        assert_eq!(outcome, Outcome::Success(temp.path().join("42.mp4")));
    }

    #[test]
    fn test_show_info_prints_metadata() {
        let mut info = tweet();
        info.formats = vec![
            crate::core::info::FormatInfo {
                height: Some(480),
                ..Default::default()
            },
            crate::core::info::FormatInfo {
                height: Some(720),
                ..Default::default()
            },
            crate::core::info::FormatInfo::default(),
        ];
        let extractor = Canned::new(Ok(info));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .show_info("https://x.com/u/status/42", &mut out)
            .unwrap();

        assert!(outcome.is_success());
        assert!(!extractor.calls.borrow()[0].2);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Título:    Clip"));
        assert!(printed.contains("Usuario:   someone"));
        assert!(printed.contains("Duración:  30 segundos"));
        assert!(printed.contains("Fecha:     2024-01-01"));
        assert!(printed.contains("Calidades: 720p, 480p"));
    }

    #[test]
    fn test_show_info_failure() {
        let extractor = Canned::new(Err(ExtractError::Download("private".into())));
        let mut out = Vec::new();

        let outcome = Downloader::new(&extractor)
            .show_info("https://x.com/u/status/42", &mut out)
            .unwrap();

        assert_eq!(outcome, Outcome::KnownFailure("private".into()));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("❌ No se pudo obtener información: private"));
    }
}
