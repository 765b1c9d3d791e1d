use crate::core::download::{DownloadRequest, Downloader};
use crate::core::quality::Quality;
use crate::core::url::is_valid_post_url;
use crate::error::Result;
use crate::utils::console::Console;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Line that ends URL collection (case-insensitive).
pub const SENTINEL: &str = "listo";

/// What happened to one line fed to a [`BatchBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEntry {
    Added,
    Omitted,
    Blank,
    Finished,
}

/// Accumulates valid post URLs, in input order, until the sentinel.
#[derive(Debug, Default)]
pub struct BatchBuilder {
    urls: Vec<String>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) -> BatchEntry {
        let line = line.trim();
        if line.eq_ignore_ascii_case(SENTINEL) {
            BatchEntry::Finished
        } else if line.is_empty() {
            BatchEntry::Blank
        } else if is_valid_post_url(line) {
            self.urls.push(line.to_string());
            BatchEntry::Added
        } else {
            BatchEntry::Omitted
        }
    }

    pub fn build(self) -> Batch {
        Batch { urls: self.urls }
    }
}

/// Finished, read-only list of URLs to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    urls: Vec<String>,
}

impl Batch {
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Reads URLs, one per line, until the sentinel or end of input.
pub fn collect_batch<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Batch> {
    writeln!(
        console.out(),
        "\nIngresa las URLs (una por línea). Escribe '{SENTINEL}' cuando termines:"
    )?;

    let mut builder = BatchBuilder::new();
    while let Some(line) = console.prompt("> ")? {
        match builder.push(&line) {
            BatchEntry::Finished => break,
            BatchEntry::Omitted => writeln!(console.out(), "    URL inválida, omitida.")?,
            BatchEntry::Added | BatchEntry::Blank => {}
        }
    }

    Ok(builder.build())
}

/// Downloads every URL of `batch` in order. A failed URL is reported and the
/// loop moves on to the next one.
pub fn run_batch<W: Write>(
    downloader: &Downloader<'_>,
    batch: &Batch,
    destination: &Path,
    quality: Quality,
    out: &mut W,
) -> Result<BatchSummary> {
    let total = batch.len();
    writeln!(out, "\nDescargando {total} videos...\n")?;

    let mut summary = BatchSummary::default();
    for (i, url) in batch.urls().iter().enumerate() {
        write!(out, "[{}/{total}] ", i + 1)?;
        let request = DownloadRequest::new(url.as_str(), destination, quality);
        if downloader.download(&request, out)?.is_success() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
    }

    writeln!(
        out,
        "\nResumen: {} descargados, {} con errores.",
        summary.succeeded, summary.failed
    )?;
    log::debug!("batch finished: {summary:?}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_classifies_lines() {
        let mut builder = BatchBuilder::new();

        assert_eq!(builder.push("https://x.com/a/status/1"), BatchEntry::Added);
        assert_eq!(builder.push("not a url"), BatchEntry::Omitted);
        assert_eq!(builder.push("   "), BatchEntry::Blank);
        assert_eq!(builder.push("https://twitter.com/b/status/2"), BatchEntry::Added);
        assert_eq!(builder.push("LISTO"), BatchEntry::Finished);

        let batch = builder.build();
        assert_eq!(
            batch.urls(),
            &[
                "https://x.com/a/status/1".to_string(),
                "https://twitter.com/b/status/2".to_string()
            ]
        );
    }

    #[test]
    fn test_collect_stops_at_sentinel() {
        let input = "https://example.com/status/1\nhttps://x.com/a/status/1\nlisto\nhttps://x.com/b/status/2\n";
        let mut console = Console::new(input.as_bytes(), Vec::new());

        let batch = collect_batch(&mut console).unwrap();

        assert_eq!(batch.urls(), &["https://x.com/a/status/1".to_string()]);
        let printed = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(printed.matches("URL inválida, omitida.").count(), 1);
    }

    #[test]
    fn test_collect_ends_at_eof() {
        let mut console = Console::new("https://x.com/a/status/1\n".as_bytes(), Vec::new());
        let batch = collect_batch(&mut console).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let mut console = Console::new("listo\n".as_bytes(), Vec::new());
        assert!(collect_batch(&mut console).unwrap().is_empty());
    }
}
