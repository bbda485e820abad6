// Generation driver: compose, validate, then write or compare artifacts.

use crate::config::{GeneratorConfig, Layout};
use crate::emit_arity::Mode;
use crate::emit_header::{compose, compose_combined};
use crate::error::GenError;
use crate::table_validator::validate_artifact;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

/// One output file and the modes it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub modes: Vec<Mode>,
    pub contents: String,
}

/// Compose every artifact the layout asks for. Nothing touches the disk.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<Artifact>, GenError> {
    let artifacts = match &config.layout {
        Layout::Separate { visit, tie } => vec![
            Artifact {
                path: visit.clone(),
                modes: vec![Mode::Visit],
                contents: compose(Mode::Visit, config),
            },
            Artifact {
                path: tie.clone(),
                modes: vec![Mode::Tie],
                contents: compose(Mode::Tie, config),
            },
        ],
        Layout::Combined(path) => vec![Artifact {
            path: path.clone(),
            modes: Mode::ALL.to_vec(),
            contents: compose_combined(config),
        }],
    };

    // Fail before anything is written if a table came out wrong.
    for artifact in &artifacts {
        for mode in &artifact.modes {
            let report = validate_artifact(&artifact.contents, *mode, config.n())?;
            debug!(
                path = %artifact.path.display(),
                mode = %report.mode,
                entries = report.entries,
                decompositions = report.decompositions,
                "table validated"
            );
        }
    }
    Ok(artifacts)
}

/// Write every artifact, or none of them.
///
/// All contents are staged in temporary files before any destination is
/// replaced. If a later rename fails, destinations already replaced get their
/// previous contents back.
pub fn write_artifacts(artifacts: &[Artifact]) -> Result<(), GenError> {
    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        staged.push(stage(artifact)?);
    }

    let mut replaced: Vec<(&Path, Option<Vec<u8>>)> = Vec::new();
    for entry in staged {
        let path = entry.artifact.path.as_path();
        if let Err(e) = entry.tmp.persist(path) {
            restore(&replaced);
            return Err(GenError::write(path, e.error));
        }
        info!(
            path = %path.display(),
            bytes = entry.artifact.contents.len(),
            "wrote artifact"
        );
        replaced.push((path, entry.previous));
    }
    Ok(())
}

/// Compare freshly composed artifacts with what is on disk.
/// Missing or differing files are reported together as `GenError::Stale`.
pub fn check_artifacts(artifacts: &[Artifact]) -> Result<(), GenError> {
    let mut stale = Vec::new();
    for artifact in artifacts {
        match fs::read_to_string(&artifact.path) {
            Ok(existing) if existing == artifact.contents => {
                debug!(path = %artifact.path.display(), "artifact up to date");
            }
            Ok(_) => {
                warn!(path = %artifact.path.display(), "artifact differs from regenerated output");
                stale.push(artifact.path.clone());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %artifact.path.display(), "artifact missing");
                stale.push(artifact.path.clone());
            }
            Err(e) => return Err(GenError::read(&artifact.path, e)),
        }
    }
    if stale.is_empty() {
        Ok(())
    } else {
        Err(GenError::Stale(stale))
    }
}

/// Generate and write in one step. This is the entry point for build scripts.
pub fn run(config: &GeneratorConfig) -> Result<Vec<Artifact>, GenError> {
    let artifacts = generate(config)?;
    write_artifacts(&artifacts)?;
    Ok(artifacts)
}

struct Staged<'a> {
    artifact: &'a Artifact,
    tmp: NamedTempFile,
    previous: Option<Vec<u8>>,
}

// Content goes to a temporary file next to the destination; it is renamed
// over the destination only once every artifact has been staged.
fn stage(artifact: &Artifact) -> Result<Staged<'_>, GenError> {
    let path = artifact.path.as_path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| GenError::write(path, e))?;

    if path.is_dir() {
        return Err(GenError::write(
            path,
            io::Error::new(io::ErrorKind::IsADirectory, "destination is a directory"),
        ));
    }
    let previous = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(GenError::read(path, e)),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GenError::write(path, e))?;
    tmp.write_all(artifact.contents.as_bytes())
        .map_err(|e| GenError::write(path, e))?;
    tmp.flush().map_err(|e| GenError::write(path, e))?;
    debug!(path = %path.display(), "staged artifact");

    Ok(Staged {
        artifact,
        tmp,
        previous,
    })
}

// Put back what a failed run already replaced.
fn restore(replaced: &[(&Path, Option<Vec<u8>>)]) {
    for (path, previous) in replaced {
        let result = match previous {
            Some(bytes) => fs::write(path, bytes),
            None => fs::remove_file(path),
        };
        match result {
            Ok(()) => warn!(path = %path.display(), "rolled back artifact"),
            Err(e) => error!(path = %path.display(), error = %e, "could not roll back artifact"),
        }
    }
}
