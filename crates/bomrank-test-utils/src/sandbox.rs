//! Scratch directory for driving the `bomrank` binary from tests.
//!
//! Everything lives under an `assert_fs::TempDir` and is cleaned up on drop.
//!
//! ```no_run
//! use bomrank_test_utils::sandbox::Sandbox;
//!
//! let output = Sandbox::new()
//!     .write("boards/main.bom", "1\nAXXX-1000:Panasonic:D1\n")
//!     .run("bomrank", ["boards/main.bom"])
//!     .unwrap();
//! assert!(output.contains("Panasonic"));
//! ```

use assert_fs::TempDir;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Sandbox {
    root: TempDir,
    default_cwd: PathBuf,
}

/// Captured result of a command that was allowed to fail.
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Create a new sandbox; all state is under an auto-cleaned TempDir.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create sandbox TempDir");
        let default_cwd = root.path().to_path_buf();
        Self { root, default_cwd }
    }

    /// Absolute path to the sandbox root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Write/overwrite a file relative to the sandbox root.
    pub fn write<P: AsRef<Path>, S: AsRef<[u8]>>(&mut self, rel: P, contents: S) -> &mut Self {
        let p = self.root_path().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(p, contents).expect("write file");
        self
    }

    /// Run a cargo binary inside this sandbox and return stdout as String.
    /// Errors if the process exits with non-zero status.
    pub fn run<I>(&self, program: &str, args: I) -> Result<String, String>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        self.expr(program, args)
            .read()
            .map_err(|e| format!("command failed: {e}"))
    }

    /// Run a cargo binary and capture its exit status, stdout and stderr
    /// without failing on a non-zero exit.
    pub fn run_unchecked<I>(&self, program: &str, args: I) -> RunOutput
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let output = self
            .expr(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .expect("spawn command");

        RunOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    fn expr<I>(&self, program: &str, args: I) -> duct::Expression
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let cargo_bin_path = assert_cmd::cargo::cargo_bin(program);
        let args: Vec<_> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string_lossy().to_string())
            .collect();

        duct::cmd(cargo_bin_path, args)
            .dir(&self.default_cwd)
            // Keep log output out of captured stderr
            .env("RUST_LOG", "off")
            .env("NO_COLOR", "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let mut sb = Sandbox::new();
        sb.write("nested/dir/file.bom", "0\n");
        let written = fs::read_to_string(sb.root_path().join("nested/dir/file.bom")).unwrap();
        assert_eq!(written, "0\n");
    }
}
