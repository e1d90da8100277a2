use crate::domain::task::{Task, TaskId};
use crate::repo::TaskStorage;
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Today,
    Upcoming,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Today, Section::Upcoming];

    pub fn title(self) -> &'static str {
        match self {
            Section::Today => "Today",
            Section::Upcoming => "Upcoming",
        }
    }

    fn contains(self, task: &Task) -> bool {
        task.is_today == (self == Section::Today)
    }
}

/// Read-only partitions over a `TaskStore` plus the commands the screen issues.
///
/// Nothing is cached: each accessor scans the store again.
pub struct TaskListView<S: TaskStorage> {
    store: TaskStore<S>,
}

impl<S: TaskStorage> TaskListView<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn tasks_in(&self, section: Section) -> impl Iterator<Item = &Task> + '_ {
        self.store
            .tasks()
            .iter()
            .filter(move |t| section.contains(t))
    }

    pub fn today_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks_in(Section::Today)
    }

    pub fn upcoming_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks_in(Section::Upcoming)
    }

    pub fn section_count(&self) -> usize {
        Section::ALL.len()
    }

    pub fn section_at(&self, index: usize) -> Option<Section> {
        Section::ALL.get(index).copied()
    }

    pub fn section_title(&self, index: usize) -> Option<&'static str> {
        self.section_at(index).map(Section::title)
    }

    pub fn create_task(&mut self, detail: impl Into<String>, is_today: bool) -> Task {
        self.store.create_task(detail, is_today)
    }

    pub fn add_task(&mut self, task: Task) {
        self.store.add_task(task);
    }

    pub fn delete_task(&mut self, id: TaskId) {
        self.store.delete_task(id);
    }

    pub fn update_task(&mut self, task: &Task) {
        self.store.update_task(task);
    }

    pub fn load_tasks(&mut self) {
        self.store.load_tasks();
    }

    pub fn on_done_toggled(&mut self, id: TaskId, done: bool) {
        self.edit(id, |t| t.is_done = done);
    }

    pub fn on_today_toggled(&mut self, id: TaskId, is_today: bool) {
        self.edit(id, |t| t.is_today = is_today);
    }

    pub fn on_delete_requested(&mut self, id: TaskId) {
        self.delete_task(id);
    }

    fn edit(&mut self, id: TaskId, change: impl FnOnce(&mut Task)) {
        let Some(mut task) = self.store.find_by_id(id).cloned() else {
            return;
        };
        change(&mut task);
        self.update_task(&task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::InMemoryStorage;
    use crate::repo::{Location, TASKS_FILE};

    fn view_with(seed: Vec<Task>) -> TaskListView<InMemoryStorage> {
        let storage = InMemoryStorage::with_seed(Location::Documents, TASKS_FILE, seed);
        let mut view = TaskListView::new(TaskStore::new(storage, Location::Documents));
        view.load_tasks();
        view
    }

    fn ids<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<TaskId> {
        tasks.map(|t| t.id).collect()
    }

    #[test]
    fn sections_have_fixed_titles() {
        let view = view_with(vec![]);
        assert_eq!(view.section_count(), 2);
        assert_eq!(view.section_title(0), Some("Today"));
        assert_eq!(view.section_title(1), Some("Upcoming"));
        assert_eq!(view.section_title(2), None);
    }

    #[test]
    fn partitions_keep_store_order_and_cover_everything() {
        let view = view_with(vec![
            Task::new(1, "a", true),
            Task::new(2, "b", false),
            Task::new(3, "c", true),
            Task::new(4, "d", false),
            Task::new(5, "e", false),
        ]);

        let today = ids(view.today_tasks());
        let upcoming = ids(view.upcoming_tasks());
        assert_eq!(today, vec![1, 3]);
        assert_eq!(upcoming, vec![2, 4, 5]);

        for task in view.tasks() {
            assert!(today.contains(&task.id) != upcoming.contains(&task.id));
        }
        assert_eq!(today.len() + upcoming.len(), view.tasks().len());
    }

    #[test]
    fn partitions_reflect_mutations_immediately() {
        let mut view = view_with(vec![Task::new(1, "a", true)]);
        view.on_today_toggled(1, false);
        assert_eq!(view.today_tasks().count(), 0);
        assert_eq!(ids(view.upcoming_tasks()), vec![1]);
    }

    #[test]
    fn commands_on_unknown_ids_are_noops() {
        let mut view = view_with(vec![Task::new(1, "a", true)]);
        view.on_done_toggled(9, true);
        view.on_today_toggled(9, false);
        view.on_delete_requested(9);
        assert_eq!(view.tasks(), &[Task::new(1, "a", true)]);
        // Only the delete rewrites the file.
        assert_eq!(view.store().storage().writes(), 1);
    }

    #[test]
    fn buy_milk_scenario() {
        let mut view = view_with(vec![]);

        let task = view.create_task("buy milk", true);
        assert_eq!(
            task,
            Task {
                id: 1,
                is_done: false,
                detail: "buy milk".into(),
                is_today: true,
            }
        );

        view.add_task(task.clone());
        assert_eq!(view.today_tasks().cloned().collect::<Vec<_>>(), vec![task.clone()]);
        assert_eq!(view.upcoming_tasks().count(), 0);

        view.update_task(&Task {
            is_done: true,
            ..task.clone()
        });
        assert!(view.today_tasks().next().unwrap().is_done);

        view.delete_task(task.id);
        assert_eq!(view.today_tasks().count(), 0);
        assert_eq!(view.upcoming_tasks().count(), 0);
    }

    #[test]
    fn done_toggle_round_trips_through_storage() {
        let mut view = view_with(vec![Task::new(1, "a", false)]);
        view.on_done_toggled(1, true);

        let saved = view
            .store()
            .storage()
            .stored(&Location::Documents, TASKS_FILE)
            .unwrap()
            .to_vec();
        assert!(saved[0].is_done);

        view.load_tasks();
        assert!(view.upcoming_tasks().next().unwrap().is_done);
    }
}
