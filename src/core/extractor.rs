use crate::core::info::VideoInfo;
use crate::error::ExtractError;
use std::path::PathBuf;

/// Settings handed to the extraction tool for a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Format selection expression, e.g. `best[height<=720]`.
    pub format: Option<String>,
    /// Output path template, e.g. `dir/%(uploader)s_%(id)s.%(ext)s`.
    pub output_template: Option<String>,
    pub quiet: bool,
    pub no_warnings: bool,
    pub show_progress: bool,
}

impl ExtractOptions {
    /// Options for a metadata-only lookup.
    pub fn metadata_only() -> Self {
        Self {
            quiet: true,
            no_warnings: true,
            ..Self::default()
        }
    }
}

/// Something that can resolve a post URL into media metadata and,
/// optionally, download the media.
pub trait Extractor {
    /// Short name used in log and diagnostic output.
    fn name(&self) -> &str;

    fn extract(
        &self,
        url: &str,
        options: &ExtractOptions,
        download: bool,
    ) -> Result<VideoInfo, ExtractError>;

    /// Path of the downloaded file described by `info`.
    fn prepare_filename(&self, info: &VideoInfo, options: &ExtractOptions) -> PathBuf {
        info.reported_path().unwrap_or_else(|| {
            let template = options
                .output_template
                .as_deref()
                .unwrap_or("%(title)s [%(id)s].%(ext)s");
            PathBuf::from(info.render_template(template))
        })
    }
}
