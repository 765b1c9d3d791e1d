use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;

static TEMPLATE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\((\w+)\)s").expect("template field pattern is valid"));

/// Metadata record returned by the extraction tool (`--dump-single-json`).
///
/// Every field is optional: the tool omits whatever a post does not carry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, rename = "_filename")]
    pub legacy_filename: Option<String>,
    #[serde(default)]
    pub requested_downloads: Vec<RequestedDownload>,
    /// Multi-video posts come back as a playlist.
    #[serde(default)]
    pub entries: Vec<VideoInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FormatInfo {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RequestedDownload {
    #[serde(default)]
    pub filepath: Option<String>,
}

impl VideoInfo {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The record describing the media itself: the first entry of a
    /// playlist, or the record itself.
    pub fn primary(&self) -> &VideoInfo {
        self.entries.first().unwrap_or(self)
    }

    /// Distinct format heights, highest first.
    pub fn available_heights(&self) -> Vec<u32> {
        let mut heights: Vec<u32> = self
            .primary()
            .formats
            .iter()
            .filter_map(|f| f.height)
            .filter(|h| *h > 0)
            .collect();
        heights.sort_unstable_by(|a, b| b.cmp(a));
        heights.dedup();
        heights
    }

    /// Final path reported by the tool after downloading, if any.
    pub fn reported_path(&self) -> Option<PathBuf> {
        let primary = self.primary();
        primary
            .requested_downloads
            .iter()
            .find_map(|d| d.filepath.clone())
            .or_else(|| primary.filename.clone())
            .or_else(|| primary.legacy_filename.clone())
            .map(PathBuf::from)
    }

    /// Value substituted for `%(name)s` in an output template.
    fn template_value(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "title" => self.title.clone(),
            "uploader" => self.uploader.clone(),
            "ext" => self.ext.clone(),
            "upload_date" => self.upload_date.clone(),
            "duration" => self.duration.map(|d| format!("{d}")),
            _ => None,
        }
    }

    /// Renders an output template against this record. Unknown or missing
    /// fields become `NA`.
    pub fn render_template(&self, template: &str) -> String {
        let primary = self.primary();
        TEMPLATE_FIELD
            .replace_all(template, |caps: &regex::Captures| {
                primary
                    .template_value(&caps[1])
                    .map(|value| value.replace(['/', '\\'], "_"))
                    .unwrap_or_else(|| "NA".to_string())
            })
            .into_owned()
    }
}

/// Human-readable field, or `N/A`.
pub fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}

/// Formats a `YYYYMMDD` upload date as `YYYY-MM-DD`; other text is shown as is.
pub fn format_upload_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y%m%d")
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "N/A".to_string(),
    }
}

pub fn format_duration(duration: Option<f64>) -> String {
    match duration {
        Some(seconds) => format!("{seconds} segundos"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "id": "1790000000000000000",
        "title": "Launch day",
        "uploader": "Some/User",
        "duration": 12.5,
        "upload_date": "20240315",
        "ext": "mp4",
        "formats": [
            {"format_id": "hls-audio", "ext": "mp4"},
            {"format_id": "http-256", "ext": "mp4", "height": 360},
            {"format_id": "http-832", "ext": "mp4", "height": 720},
            {"format_id": "hls-832", "ext": "mp4", "height": 720},
            {"format_id": "http-2176", "ext": "mp4", "height": 1080}
        ],
        "unused_field": true
    }"#;

    #[test]
    fn test_parses_tool_output() {
        let info = VideoInfo::from_json(SAMPLE).unwrap();
        assert_eq!(info.title.as_deref(), Some("Launch day"));
        assert_eq!(info.duration, Some(12.5));
        assert_eq!(info.formats.len(), 5);
    }

    #[test]
    fn test_available_heights_are_distinct_and_descending() {
        let info = VideoInfo::from_json(SAMPLE).unwrap();
        assert_eq!(info.available_heights(), vec![1080, 720, 360]);
    }

    #[test]
    fn test_render_template_sanitizes_and_defaults() {
        let info = VideoInfo::from_json(SAMPLE).unwrap();
        assert_eq!(
            info.render_template("out/%(uploader)s_%(id)s.%(ext)s"),
            "out/Some_User_1790000000000000000.mp4"
        );
        assert_eq!(info.render_template("%(channel)s.%(ext)s"), "NA.mp4");
    }

    #[test]
    fn test_reported_path_prefers_requested_downloads() {
        let info = VideoInfo::from_json(
            r#"{"filename": "a.mp4", "requested_downloads": [{"filepath": "/tmp/b.mp4"}]}"#,
        )
        .unwrap();
        assert_eq!(info.reported_path(), Some(PathBuf::from("/tmp/b.mp4")));

        let info = VideoInfo::from_json(r#"{"_filename": "c.mp4"}"#).unwrap();
        assert_eq!(info.reported_path(), Some(PathBuf::from("c.mp4")));

        let info =
            VideoInfo::from_json(r#"{"filename": "d.mp4", "_filename": "d.mp4"}"#).unwrap();
        assert_eq!(info.reported_path(), Some(PathBuf::from("d.mp4")));

        assert_eq!(VideoInfo::default().reported_path(), None);
    }

    #[test]
    fn test_playlist_uses_first_entry() {
        let info = VideoInfo::from_json(
            r#"{"id": "list", "entries": [
                {"id": "1", "uploader": "u", "ext": "mp4", "formats": [{"height": 480}]},
                {"id": "2", "formats": [{"height": 1080}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(info.render_template("%(uploader)s_%(id)s.%(ext)s"), "u_1.mp4");
        assert_eq!(info.available_heights(), vec![480]);
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(format_upload_date(Some("20240315")), "2024-03-15");
        assert_eq!(format_upload_date(Some("yesterday")), "yesterday");
        assert_eq!(format_upload_date(None), "N/A");
        assert_eq!(format_duration(Some(12.5)), "12.5 segundos");
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(or_na(None), "N/A");
    }
}
