use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// A single to-do entry as persisted in `todos.json`.
///
/// `id` is assigned once by `TaskStore::create_task` and never changes.
/// Identity lookups go through `TaskStore::find_by_id`; the derived equality
/// is structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub is_done: bool,
    pub detail: String,
    pub is_today: bool,
}

impl Task {
    pub fn new(id: TaskId, detail: impl Into<String>, is_today: bool) -> Self {
        Self {
            id,
            is_done: false,
            detail: detail.into(),
            is_today,
        }
    }

    /// Copies the mutable fields of `other` onto `self`, leaving `id` alone.
    pub fn update_from(&mut self, other: &Task) {
        self.is_done = other.is_done;
        self.detail.clone_from(&other.detail);
        self.is_today = other.is_today;
    }
}
