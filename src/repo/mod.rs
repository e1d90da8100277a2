use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::task::Task;

pub mod json;
pub mod memory;

pub const APP_DIR: &str = "daylist";
pub const TASKS_FILE: &str = "todos.json";

/// Where a named file lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Documents,
    Caches,
    Dir(PathBuf),
}

impl Location {
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            Location::Documents => Ok(dirs::data_dir()
                .context("failed to resolve data dir")?
                .join(APP_DIR)),
            Location::Caches => Ok(dirs::cache_dir()
                .context("failed to resolve cache dir")?
                .join(APP_DIR)),
            Location::Dir(path) => Ok(path.clone()),
        }
    }
}

/// Storage capability used by `TaskStore`.
///
/// `store` overwrites the whole named file. `retrieve` returns `None` both
/// for a missing file and for one that cannot be decoded.
pub trait TaskStorage {
    fn store(&mut self, items: &[Task], location: &Location, name: &str) -> Result<()>;
    fn retrieve(&self, name: &str, location: &Location) -> Option<Vec<Task>>;
}

impl<S: TaskStorage + ?Sized> TaskStorage for Box<S> {
    fn store(&mut self, items: &[Task], location: &Location, name: &str) -> Result<()> {
        (**self).store(items, location, name)
    }

    fn retrieve(&self, name: &str, location: &Location) -> Option<Vec<Task>> {
        (**self).retrieve(name, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_location_resolves_verbatim() {
        let path = PathBuf::from("/tmp/daylist-test");
        assert_eq!(Location::Dir(path.clone()).resolve().unwrap(), path);
    }
}
