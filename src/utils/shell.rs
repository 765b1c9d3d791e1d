use std::path::Path;
use std::process::Command;

/// Runs `program args...` and returns its trimmed stdout when it exits successfully.
pub fn capture_stdout(program: &Path, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(output) => {
            log::debug!("{} {:?} exited with {}", program.display(), args, output.status);
            None
        }
        Err(e) => {
            log::debug!("failed to run {}: {e}", program.display());
            None
        }
    }
}

/// Locates a Python interpreter on PATH.
pub fn find_python() -> Option<std::path::PathBuf> {
    ["python3", "python"]
        .iter()
        .find_map(|name| which::which(name).ok())
}
