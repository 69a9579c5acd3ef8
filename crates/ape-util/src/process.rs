use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::errors::ApeError;

/// Builder for shelling out to external tools such as `git`.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Execute the command and return its raw output.
    pub fn exec(&self) -> Result<Output, ApeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!("running {} {}", self.program, self.args.join(" "));
        cmd.output().map_err(ApeError::from)
    }

    /// Execute the command and return its trimmed stdout.
    ///
    /// A non-zero exit status is reported as [`ApeError::Generic`] carrying stderr.
    pub fn stdout(&self) -> Result<String, ApeError> {
        let output = self.exec()?;
        if !output.status.success() {
            return Err(ApeError::Generic {
                message: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
