use crate::core::extractor::{ExtractOptions, Extractor};
use crate::core::info::VideoInfo;
use crate::error::ExtractError;
use crate::utils::shell;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// `yt-dlp` invoked as a subprocess, either as a standalone executable or
/// as `python -m yt_dlp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtDlp {
    program: PathBuf,
    prefix: Vec<String>,
}

impl YtDlp {
    pub fn binary(path: impl Into<PathBuf>) -> Self {
        Self {
            program: path.into(),
            prefix: Vec::new(),
        }
    }

    pub fn python_module(python: impl Into<PathBuf>) -> Self {
        Self {
            program: python.into(),
            prefix: vec!["-m".to_string(), "yt_dlp".to_string()],
        }
    }

    /// Command line prefix, e.g. `/usr/bin/python3 -m yt_dlp`.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.prefix.iter().cloned());
        parts.join(" ")
    }

    /// Output of `--version`, or `None` when the launcher does not work.
    pub fn version(&self) -> Option<String> {
        let mut args: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        args.push("--version");
        shell::capture_stdout(&self.program, &args).filter(|v| !v.is_empty())
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.prefix).stdin(Stdio::null());
        command
    }

    /// Runs the tool, echoing its stderr (progress, warnings) line by line
    /// while collecting stdout. Returns stdout on success.
    fn run_streaming(&self, args: &[String]) -> Result<String, ExtractError> {
        let mut child = self
            .command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExtractError::Unexpected(format!("could not start {}: {e}", self.describe())))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Both pipes must be drained concurrently: stdout on a scoped
        // thread, stderr here.
        let (out_text, err_text) = std::thread::scope(|scope| {
            let reader = scope.spawn(move || {
                let mut buf = String::new();
                if let Some(mut out) = stdout {
                    if let Err(e) = out.read_to_string(&mut buf) {
                        log::warn!("failed to read yt-dlp output: {e}");
                    }
                }
                buf
            });

            let mut tail = StderrTail::default();
            if let Some(err) = stderr {
                for line in BufReader::new(err).lines().map_while(|l| l.ok()) {
                    if !line.starts_with("ERROR:") {
                        eprintln!("{line}");
                    }
                    tail.push(line);
                }
            }

            (reader.join().unwrap_or_default(), tail.into_text())
        });

        let status = child
            .wait()
            .map_err(|e| ExtractError::Unexpected(format!("failed waiting for yt-dlp: {e}")))?;
        log::debug!("yt-dlp exited with {status}");

        if status.success() {
            Ok(out_text)
        } else {
            Err(classify_failure(status.code(), &err_text))
        }
    }

    fn run_captured(&self, args: &[String]) -> Result<String, ExtractError> {
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|e| ExtractError::Unexpected(format!("could not start {}: {e}", self.describe())))?;
        log::debug!("yt-dlp exited with {}", output.status);

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(classify_failure(
                output.status.code(),
                &String::from_utf8_lossy(&output.stderr),
            ))
        }
    }
}

/// The parts of a long stderr stream that [`classify_failure`] looks at:
/// every `ERROR:` line and the last non-empty line.
#[derive(Debug, Default)]
struct StderrTail {
    errors: Vec<String>,
    last: Option<String>,
}

impl StderrTail {
    fn push(&mut self, line: String) {
        if line.trim().is_empty() {
            return;
        }
        if line.trim().starts_with("ERROR:") {
            self.errors.push(line.clone());
        }
        self.last = Some(line);
    }

    fn into_text(self) -> String {
        let mut lines = self.errors;
        if let Some(last) = self.last {
            if lines.last() != Some(&last) {
                lines.push(last);
            }
        }
        lines.join("\n")
    }
}

impl Extractor for YtDlp {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    fn extract(
        &self,
        url: &str,
        options: &ExtractOptions,
        download: bool,
    ) -> Result<VideoInfo, ExtractError> {
        let args = build_args(url, options, download);
        log::debug!("running {} {}", self.describe(), args.join(" "));

        let stdout = if download {
            self.run_streaming(&args)?
        } else {
            self.run_captured(&args)?
        };

        VideoInfo::from_json(stdout.trim())
            .map_err(|e| ExtractError::Unexpected(format!("invalid JSON from yt-dlp: {e}")))
    }
}

/// Argument vector for one yt-dlp call. Metadata always comes back as a
/// single JSON document on stdout.
pub fn build_args(url: &str, options: &ExtractOptions, download: bool) -> Vec<String> {
    let mut args = vec!["--dump-single-json".to_string()];

    if download {
        args.push("--no-simulate".to_string());
        if options.show_progress {
            args.push("--progress".to_string());
            args.push("--newline".to_string());
        }
    }

    if options.quiet {
        args.push("--quiet".to_string());
    }
    if options.no_warnings {
        args.push("--no-warnings".to_string());
    }

    if let Some(format) = &options.format {
        args.push("-f".to_string());
        args.push(format.clone());
    }
    if let Some(template) = &options.output_template {
        args.push("-o".to_string());
        args.push(template.clone());
    }

    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// Maps a failed run to an error tier. yt-dlp exits with 1 and prints an
/// `ERROR:` line when it cannot retrieve the media.
pub fn classify_failure(code: Option<i32>, stderr: &str) -> ExtractError {
    let error_line = stderr
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix("ERROR:"))
        .map(|reason| reason.trim().to_string());

    match (code, error_line) {
        (Some(1), Some(reason)) => ExtractError::Download(reason),
        (code, reason) => {
            let detail = reason
                .or_else(|| {
                    stderr
                        .lines()
                        .rev()
                        .map(str::trim)
                        .find(|line| !line.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "no output".to_string());
            let status = code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            ExtractError::Unexpected(format!("yt-dlp exited with status {status}: {detail}"))
        }
    }
}
