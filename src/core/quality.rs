use std::fmt;

/// Video quality requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    #[default]
    Best,
    P720,
    P480,
    P360,
    Worst,
}

impl Quality {
    /// Parses an exact quality name (`best`, `worst`, `720`, `480`, `360`).
    /// Anything else, including the empty string, is `Best`.
    pub fn parse(value: &str) -> Self {
        match value {
            "worst" => Quality::Worst,
            "720" => Quality::P720,
            "480" => Quality::P480,
            "360" => Quality::P360,
            _ => Quality::Best,
        }
    }

    /// Maps the interactive menu choice (1-5) to a quality.
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => Quality::P720,
            "3" => Quality::P480,
            "4" => Quality::P360,
            "5" => Quality::Worst,
            _ => Quality::Best,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::P720 => "720",
            Quality::P480 => "480",
            Quality::P360 => "360",
            Quality::Worst => "worst",
        }
    }

    /// yt-dlp format selection expression.
    pub fn format_selector(&self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::P720 => "best[height<=720]",
            Quality::P480 => "best[height<=480]",
            Quality::P360 => "best[height<=360]",
            Quality::Worst => "worst",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
