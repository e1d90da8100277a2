use crate::domain::task::{Task, TaskId};
use crate::repo::TaskStorage;
use crate::view::{Section, TaskListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App<S: TaskStorage> {
    pub view: TaskListView<S>,
    /// Index into `rows()`: today tasks first, then upcoming.
    pub selected: usize,
    pub mode: InputMode,
    pub input: String,
    pub input_today: bool,
    pub status: Option<String>,
}

impl<S: TaskStorage> App<S> {
    pub fn new(mut view: TaskListView<S>) -> Self {
        view.load_tasks();
        Self {
            view,
            selected: 0,
            mode: InputMode::Normal,
            input: String::new(),
            input_today: false,
            status: None,
        }
    }

    /// Tasks in display order, tagged with their section.
    pub fn rows(&self) -> Vec<(Section, &Task)> {
        Section::ALL
            .iter()
            .flat_map(|&section| self.view.tasks_in(section).map(move |t| (section, t)))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.view.tasks().len()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.rows().get(self.selected).map(|(_, t)| *t)
    }

    fn clamp_selection(&mut self) {
        let len = self.row_count();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn select_id(&mut self, id: TaskId) {
        if let Some(pos) = self.rows().iter().position(|(_, t)| t.id == id) {
            self.selected = pos;
        }
    }

    pub fn reload(&mut self) {
        self.view.load_tasks();
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.row_count();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn start_editing(&mut self) {
        self.mode = InputMode::Editing;
        self.input.clear();
        self.input_today = false;
        self.set_status("Type new task, Tab toggles today, Enter adds");
    }

    pub fn cancel_editing(&mut self) {
        self.mode = InputMode::Normal;
        self.input.clear();
        self.input_today = false;
        self.set_status("Canceled");
    }

    pub fn toggle_input_today(&mut self) {
        self.input_today = !self.input_today;
    }

    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, done) = (task.id, !task.is_done);
        self.view.on_done_toggled(id, done);
        self.set_status(if done { "Done" } else { "Reopened" });
    }

    pub fn move_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, is_today) = (task.id, !task.is_today);
        self.view.on_today_toggled(id, is_today);
        self.select_id(id);
        let section = if is_today {
            Section::Today
        } else {
            Section::Upcoming
        };
        self.set_status(&format!("Moved to {}", section.title()));
    }

    /// Only completed tasks can be deleted.
    pub fn delete_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if !task.is_done {
            self.set_status("Mark the task done before deleting it");
            return;
        }
        let id = task.id;
        self.view.on_delete_requested(id);
        self.clamp_selection();
        self.set_status("Deleted");
    }

    pub fn add_task(&mut self) {
        if self.input.trim().is_empty() {
            self.set_status("Cannot add an empty task");
            return;
        }
        let detail = self.input.trim().to_owned();
        let task = self.view.create_task(detail, self.input_today);
        let id = task.id;
        self.view.add_task(task);
        self.input.clear();
        self.input_today = false;
        self.mode = InputMode::Normal;
        self.select_id(id);
        self.set_status("Added");
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status = Some(msg.to_string());
    }
}
