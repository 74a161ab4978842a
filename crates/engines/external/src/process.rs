//! Scratch files and synchronous backend invocation.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use engine_core::EngineError;
use tracing::{debug, warn};

use crate::protocol::{RequestDocument, ResponseDocument};

/// Directory holding one input/output pair per search.
///
/// Files are never removed; they are the audit trail of every call.
#[derive(Debug, Clone)]
pub struct ScratchArea {
    root: PathBuf,
}

impl ScratchArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths for the `index`-th call, creating the directory if needed.
    pub fn allocate(&self, index: u64) -> Result<FilePair, EngineError> {
        fs::create_dir_all(&self.root).map_err(|source| EngineError::ScratchDir {
            path: self.root.clone(),
            source,
        })?;
        Ok(FilePair {
            input: self.root.join(format!("input-{index}.txt")),
            output: self.root.join(format!("output-{index}.txt")),
        })
    }
}

/// Request and response paths of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FilePair {
    pub fn write_request(&self, request: &RequestDocument) -> Result<(), EngineError> {
        fs::write(&self.input, request.to_string()).map_err(|source| EngineError::Invocation {
            action: "write request",
            path: self.input.clone(),
            source,
        })
    }

    pub fn read_response(&self) -> Result<ResponseDocument, EngineError> {
        let text = fs::read_to_string(&self.output).map_err(|source| EngineError::Invocation {
            action: "read response",
            path: self.output.clone(),
            source,
        })?;
        Ok(ResponseDocument::parse(&text))
    }
}

/// Run the backend with the request file on stdin and the response file on
/// stdout, blocking until it exits.
///
/// The exit status is only logged; the response file is the sole result.
pub fn run_backend(command: &Path, args: &[String], files: &FilePair) -> Result<(), EngineError> {
    let stdin = File::open(&files.input).map_err(|source| EngineError::Invocation {
        action: "open request",
        path: files.input.clone(),
        source,
    })?;
    let stdout = File::create(&files.output).map_err(|source| EngineError::Invocation {
        action: "create response",
        path: files.output.clone(),
        source,
    })?;

    debug!(command = %command.display(), input = %files.input.display(), "launching backend");
    let status = Command::new(command)
        .args(args)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| EngineError::Invocation {
            action: "launch",
            path: command.to_path_buf(),
            source,
        })?;

    if !status.success() {
        warn!(command = %command.display(), %status, "backend exited unsuccessfully");
    }
    Ok(())
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod process_tests;
