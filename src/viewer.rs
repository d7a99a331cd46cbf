//! Showing the assembly in an external STL viewer.

use crate::assembly::Assembly;
use crate::errors::Error;
use crate::io::{IoError, StlFormat, write_stl};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// File name of the multi-body assembly STL.
pub const ASSEMBLY_FILE: &str = "assembly.stl";

/// An external program that opens an STL file given as its last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    program: String,
    args: Vec<String>,
}

impl Viewer {
    /// Parse a whitespace-separated command line such as `"f3d --up +z"`.
    ///
    /// Returns `None` for a blank command.
    pub fn from_command(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_owned);
        let program = words.next()?;
        Some(Viewer {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Launch the viewer on `path` without waiting for it to exit.
    pub fn open(&self, path: &Path) -> Result<(), Error> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| Error::Viewer {
                command: self.to_string(),
                source,
            })?;
        info!(pid = child.id(), viewer = %self, path = %path.display(), "viewer launched");
        Ok(())
    }
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Write the assembly as one multi-body STL in `dir`.
pub fn write_assembly(assembly: &Assembly, dir: &Path, format: StlFormat) -> Result<PathBuf, IoError> {
    std::fs::create_dir_all(dir).map_err(|source| IoError::File {
        action: "failed to create",
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(ASSEMBLY_FILE);
    write_stl(&assembly.to_mesh(), "assembly", &path, format)?;
    Ok(path)
}

/// Write the assembly to `dir` and hand it to `viewer`, if one is configured.
pub fn show(
    assembly: &Assembly,
    dir: &Path,
    format: StlFormat,
    viewer: Option<&Viewer>,
) -> Result<PathBuf, Error> {
    let path = write_assembly(assembly, dir, format)?;
    match viewer {
        Some(viewer) => viewer.open(&path)?,
        None => warn!(
            path = %path.display(),
            "no viewer configured (set --viewer or KNOB_VIEWER); open the assembly manually"
        ),
    }
    Ok(path)
}
