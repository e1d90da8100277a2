use log::{debug, info, warn};

use crate::domain::task::{Task, TaskId};
use crate::repo::{Location, TASKS_FILE, TaskStorage};

/// Canonical task list plus the id counter.
///
/// Every mutation rewrites the whole list through `storage`. A failed write
/// is logged and otherwise ignored; the in-memory list stays authoritative.
pub struct TaskStore<S: TaskStorage> {
    storage: S,
    location: Location,
    tasks: Vec<Task>,
    last_id: TaskId,
}

impl<S: TaskStorage> TaskStore<S> {
    pub fn new(storage: S, location: Location) -> Self {
        Self {
            storage,
            location,
            tasks: Vec::new(),
            last_id: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn last_id(&self) -> TaskId {
        self.last_id
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn find_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Allocates the next id and builds an open task. The list is untouched.
    pub fn create_task(&mut self, detail: impl Into<String>, is_today: bool) -> Task {
        self.last_id += 1;
        Task::new(self.last_id, detail, is_today)
    }

    /// Appends without checking for an existing id.
    pub fn add_task(&mut self, task: Task) {
        debug!("add task id={} today={}", task.id, task.is_today);
        self.tasks.push(task);
        self.save();
    }

    pub fn delete_task(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        debug!("delete task id={id} removed={}", before - self.tasks.len());
        self.save();
    }

    pub fn update_task(&mut self, task: &Task) {
        let Some(index) = self.position_of(task.id) else {
            debug!("update of unknown task id={} ignored", task.id);
            return;
        };
        self.tasks[index].update_from(task);
        debug!("update task id={} done={}", task.id, task.is_done);
        self.save();
    }

    /// Replaces the list with what storage holds, or an empty list.
    ///
    /// The counter is reseeded from the *last* task's id, not the largest.
    pub fn load_tasks(&mut self) {
        self.tasks = self
            .storage
            .retrieve(TASKS_FILE, &self.location)
            .unwrap_or_default();
        self.last_id = self.tasks.last().map_or(0, |t| t.id);
        info!(
            "loaded {} tasks, last_id={}",
            self.tasks.len(),
            self.last_id
        );
    }

    fn save(&mut self) {
        if let Err(err) = self.storage.store(&self.tasks, &self.location, TASKS_FILE) {
            warn!("failed to save {TASKS_FILE}: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::InMemoryStorage;

    fn empty_store() -> TaskStore<InMemoryStorage> {
        TaskStore::new(InMemoryStorage::default(), Location::Documents)
    }

    fn seeded_store(seed: Vec<Task>) -> TaskStore<InMemoryStorage> {
        let storage = InMemoryStorage::with_seed(Location::Documents, TASKS_FILE, seed);
        let mut store = TaskStore::new(storage, Location::Documents);
        store.load_tasks();
        store
    }

    fn persisted(store: &TaskStore<InMemoryStorage>) -> Vec<Task> {
        store
            .storage()
            .stored(&Location::Documents, TASKS_FILE)
            .unwrap_or_default()
            .to_vec()
    }

    #[test]
    fn create_task_ids_increase_from_last_id() {
        let mut store = seeded_store(vec![Task::new(4, "seed", false)]);
        let ids: Vec<_> = (0..5)
            .map(|i| store.create_task(format!("t{i}"), false).id)
            .collect();
        assert_eq!(ids, vec![5, 6, 7, 8, 9]);
        assert_eq!(store.last_id(), 9);
    }

    #[test]
    fn create_task_does_not_insert() {
        let mut store = empty_store();
        let task = store.create_task("", true);
        assert_eq!(task, Task::new(1, "", true));
        assert!(store.tasks().is_empty());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = empty_store();
        let first = store.create_task("a", false);
        store.add_task(first.clone());
        store.delete_task(first.id);
        assert_eq!(store.create_task("b", false).id, 2);
    }

    #[test]
    fn add_task_appends_and_persists() {
        let mut store = empty_store();
        let a = store.create_task("a", true);
        let b = store.create_task("b", false);
        store.add_task(a.clone());
        store.add_task(b.clone());

        assert_eq!(store.tasks(), &[a.clone(), b.clone()]);
        assert_eq!(persisted(&store), vec![a, b]);
        assert_eq!(store.storage().writes(), 2);
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let mut store = empty_store();
        for detail in ["a", "b", "c"] {
            let task = store.create_task(detail, false);
            store.add_task(task);
        }
        let edited = Task {
            id: 2,
            is_done: true,
            detail: "b2".into(),
            is_today: true,
        };
        store.update_task(&edited);

        assert_eq!(store.position_of(2), Some(1));
        assert_eq!(store.tasks()[1], edited);
        assert_eq!(persisted(&store)[1], edited);
    }

    #[test]
    fn update_of_unknown_id_changes_nothing() {
        let mut store = empty_store();
        let task = store.create_task("a", false);
        store.add_task(task);
        let before = store.tasks().to_vec();
        let writes = store.storage().writes();

        store.update_task(&Task::new(42, "ghost", true));

        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = empty_store();
        for detail in ["a", "b"] {
            let task = store.create_task(detail, false);
            store.add_task(task);
        }

        store.delete_task(99);
        assert_eq!(store.tasks().len(), 2);

        store.delete_task(1);
        assert_eq!(store.tasks().len(), 1);
        assert!(store.find_by_id(1).is_none());

        store.delete_task(1);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(persisted(&store), vec![Task::new(2, "b", false)]);
    }

    #[test]
    fn load_of_missing_data_is_empty() {
        let mut store = empty_store();
        store.load_tasks();
        assert!(store.tasks().is_empty());
        assert_eq!(store.last_id(), 0);
    }

    #[test]
    fn load_replaces_in_memory_list() {
        let mut store = seeded_store(vec![Task::new(1, "a", false)]);
        let extra = store.create_task("unsaved", false);
        store.tasks.push(extra);

        store.load_tasks();

        assert_eq!(store.tasks(), &[Task::new(1, "a", false)]);
        assert_eq!(store.last_id(), 1);
    }

    // Reseeding uses the last element, not the maximum id.
    #[test]
    fn load_reseeds_last_id_from_last_element() {
        let store = seeded_store(vec![Task::new(5, "five", false), Task::new(2, "two", false)]);
        assert_eq!(store.last_id(), 2);
    }

    #[test]
    fn out_of_order_reseed_can_hand_out_existing_id() {
        let mut store = seeded_store(vec![
            Task::new(3, "three", false),
            Task::new(1, "one", false),
        ]);
        store.create_task("x", false);
        let next = store.create_task("y", false);
        assert_eq!(next.id, 3);
        assert!(store.find_by_id(next.id).is_some());
    }

    #[test]
    fn negative_ids_survive_load_and_add() {
        let mut store = seeded_store(vec![Task::new(-1, "old", true), Task::new(2, "b", false)]);
        let task = store.create_task("new", false);
        store.add_task(task);

        let ids: Vec<_> = persisted(&store).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![-1, 2, 3]);
    }

    #[test]
    fn failed_write_keeps_in_memory_mutation() {
        let mut store = empty_store();
        let task = store.create_task("a", true);
        store.add_task(task.clone());

        store.storage.fail_writes(true);
        let second = store.create_task("b", false);
        store.add_task(second.clone());

        assert_eq!(store.tasks(), &[task.clone(), second]);
        assert_eq!(persisted(&store), vec![task]);
    }
}
