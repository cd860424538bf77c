// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

const PYTHON_CANDIDATES: [&str; 2] = ["python3", "python"];
const QUOM_PROBE: &str =
    "import importlib.util, sys; sys.exit(0 if importlib.util.find_spec('quom') else 1)";

/// Turns a tree of sources joined by local includes into one ordered list
/// of lines.
pub trait Flattener {
    /// Fails when the tool can't run here. Called before anything touches
    /// the filesystem.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Flattens `entry`, placing implementation sources where the `stitch`
    /// comment appears.
    fn flatten(&self, entry: &Path, stitch: &str) -> Result<Flattened>;
}

/// Lines produced by a [`Flattener`], plus the scratch file they were
/// read from, if any.
#[derive(Debug)]
pub struct Flattened {
    pub lines: Vec<String>,
    scratch: Option<ScratchFile>,
}

impl Flattened {
    pub fn new(lines: Vec<String>) -> Flattened {
        Flattened {
            lines,
            scratch: None,
        }
    }

    pub fn with_scratch(lines: Vec<String>, scratch: ScratchFile) -> Flattened {
        Flattened {
            lines,
            scratch: Some(scratch),
        }
    }

    /// Splits off the lines, leaving the scratch file alive with the
    /// returned guard.
    pub fn into_parts(self) -> (Vec<String>, Option<ScratchFile>) {
        (self.lines, self.scratch)
    }
}

/// A file that must not outlive the run.
///
/// [`ScratchFile::remove`] deletes it and reports failure; dropping the
/// guard without calling it deletes it quietly.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    armed: bool,
}

impl ScratchFile {
    pub fn new(path: impl Into<PathBuf>) -> ScratchFile {
        ScratchFile {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes a file left behind by an earlier run, if there is one.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("removed stale {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io("removing", self.path.clone())(e)),
        }
    }

    pub fn remove(mut self) -> Result<()> {
        self.armed = false;
        fs::remove_file(&self.path).map_err(Error::io("removing", self.path.clone()))?;
        debug!("removed {}", self.path.display());
        Ok(())
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", self.path.display(), e),
        }
    }
}

/// Runs quom (<https://github.com/Viatorus/quom>) as
/// `python -m quom <entry> -s <stitch> <output>`.
#[derive(Debug, Clone)]
pub struct Quom {
    python: Option<PathBuf>,
    output: PathBuf,
}

impl Quom {
    /// `output` is the scratch file quom writes to. `python` overrides the
    /// interpreter lookup on `PATH`.
    pub fn new(python: Option<PathBuf>, output: impl Into<PathBuf>) -> Quom {
        Quom {
            python,
            output: output.into(),
        }
    }

    fn python(&self) -> Result<PathBuf> {
        if let Some(ref python) = self.python {
            return which::which(python).map_err(|_| Error::InterpreterMissing {
                tried: python.display().to_string(),
            });
        }
        PYTHON_CANDIDATES
            .iter()
            .find_map(|candidate| which::which(candidate).ok())
            .ok_or_else(|| Error::InterpreterMissing {
                tried: PYTHON_CANDIDATES.join(", "),
            })
    }
}

impl Flattener for Quom {
    fn ensure_available(&self) -> Result<()> {
        let python = self.python()?;
        debug!("probing for quom with {}", python.display());
        let status = Command::new(&python)
            .arg("-c")
            .arg(QUOM_PROBE)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(Error::io("running", python.clone()))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::FlattenerMissing {
                python: python.display().to_string(),
            })
        }
    }

    fn flatten(&self, entry: &Path, stitch: &str) -> Result<Flattened> {
        let python = self.python()?;
        info!(
            "flattening {} into {}",
            entry.display(),
            self.output.display()
        );
        // Whatever sits at the output path after this was written by quom,
        // and goes away with the guard if quom fails.
        let scratch = ScratchFile::new(&self.output);
        scratch.clear()?;
        let status = Command::new(&python)
            .args(["-m", "quom"])
            .arg(entry)
            .arg("-s")
            .arg(stitch)
            .arg(scratch.path())
            .stdin(Stdio::null())
            .status()
            .map_err(Error::io("running", python))?;
        if !status.success() {
            return Err(Error::FlattenFailed {
                entry: entry.to_path_buf(),
                status,
            });
        }
        if !scratch.path().is_file() {
            return Err(Error::MissingOutput(scratch.path().to_path_buf()));
        }
        let lines = read_lines(scratch.path())?;
        Ok(Flattened::with_scratch(lines, scratch))
    }
}

/// Reads a whole file as lines, each keeping its terminator.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let fd = File::open(path).map_err(Error::io("opening", path))?;
    let mut reader = BufReader::new(fd);
    let mut lines = Vec::new();
    let mut line = String::new();
    while reader
        .read_line(&mut line)
        .map_err(Error::io("reading", path))?
        > 0
    {
        lines.push(std::mem::take(&mut line));
    }
    Ok(lines)
}
