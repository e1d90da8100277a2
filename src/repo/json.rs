use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Location, TaskStorage};
use crate::domain::task::Task;

/// Keeps each named list as a JSON array file under the resolved location.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileStorage;

impl TaskStorage for JsonFileStorage {
    fn store(&mut self, items: &[Task], location: &Location, name: &str) -> Result<()> {
        let dir = location.resolve()?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data dir {}", dir.display()))?;
        let bytes = serde_json::to_vec(items).context("failed to encode tasks")?;
        write_atomic(&dir.join(name), &bytes)
    }

    fn retrieve(&self, name: &str, location: &Location) -> Option<Vec<Task>> {
        let path = match location.resolve() {
            Ok(dir) => dir.join(name),
            Err(err) => {
                warn!("cannot resolve location {location:?}: {err:#}");
                return None;
            }
        };
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no saved tasks at {}", path.display());
                return None;
            }
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(tasks) => Some(tasks),
            Err(err) => {
                warn!("failed to decode {}: {err}", path.display());
                None
            }
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    std::fs::write(&tmp, bytes).with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
