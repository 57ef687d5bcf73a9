use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Context, Error, Result};

/// Persists the highest mention id answered so far as a bare integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when nothing has been stored yet.
    pub fn read(&self) -> Result<Option<u64>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no checkpoint at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e).context("reading checkpoint"),
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let id = trimmed.parse::<u64>().map_err(|e| {
            Error::Format(format!(
                "checkpoint {} holds {trimmed:?}: {e}",
                self.path.display()
            ))
        })?;
        debug!("read checkpoint {id}");
        Ok(Some(id))
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash leaves either the old or the new value.
    pub fn write(&self, id: u64) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| {
                Error::InvalidArgument(format!("bad checkpoint path {}", self.path.display()))
            })?
            .to_string_lossy();
        let tmp_path = dir.join(format!(".{file_name}.tmp"));
        {
            let mut file = fs::File::create(&tmp_path).context("creating checkpoint temp file")?;
            writeln!(file, "{id}").context("writing checkpoint")?;
            file.sync_all().context("syncing checkpoint")?;
        }
        fs::rename(&tmp_path, &self.path).context("replacing checkpoint")?;
        info!("checkpoint {id} written to {}", self.path.display());
        Ok(())
    }
}
