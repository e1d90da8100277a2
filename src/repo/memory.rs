use std::collections::HashMap;

use anyhow::{Result, bail};

use super::{Location, TaskStorage};
use crate::domain::task::Task;

#[derive(Default)]
pub struct InMemoryStorage {
    files: HashMap<(Location, String), Vec<Task>>,
    fail_writes: bool,
    writes: usize,
}

impl InMemoryStorage {
    pub fn with_seed(
        location: Location,
        name: impl Into<String>,
        seed: impl IntoIterator<Item = Task>,
    ) -> Self {
        let mut storage = Self::default();
        storage
            .files
            .insert((location, name.into()), seed.into_iter().collect());
        storage
    }

    /// Makes every subsequent `store` fail without touching saved data.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn stored(&self, location: &Location, name: &str) -> Option<&[Task]> {
        self.files
            .get(&(location.clone(), name.to_owned()))
            .map(Vec::as_slice)
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TaskStorage for InMemoryStorage {
    fn store(&mut self, items: &[Task], location: &Location, name: &str) -> Result<()> {
        if self.fail_writes {
            bail!("in-memory storage is read-only");
        }
        self.files
            .insert((location.clone(), name.to_owned()), items.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn retrieve(&self, name: &str, location: &Location) -> Option<Vec<Task>> {
        self.stored(location, name).map(<[Task]>::to_vec)
    }
}
