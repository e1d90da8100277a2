use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use daylist::app::App;
use daylist::domain::task::Task;
use daylist::logging;
use daylist::repo::json::JsonFileStorage;
use daylist::repo::memory::InMemoryStorage;
use daylist::repo::{Location, TASKS_FILE, TaskStorage};
use daylist::store::TaskStore;
use daylist::ui;
use daylist::view::TaskListView;

#[derive(Parser, Debug)]
#[command(author, version, about = "daylist: today and upcoming todo list", long_about = None)]
struct Args {
    /// Tick interval of render loop in milliseconds
    #[arg(long, default_value_t = 120)]
    tick_ms: u64,

    /// Start with demo tasks (nothing is written to disk)
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Keep tasks in memory instead of todos.json
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Directory holding todos.json (default: OS data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for log files (default: OS cache dir)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = match args.log_dir.clone() {
        Some(dir) => dir,
        None => logging::default_log_dir()?,
    };
    let level = logging::resolve_level(args.log_level.as_deref());
    let _logger = logging::init_logging(level, &log_dir)?;

    let location = match args.data_dir.clone() {
        Some(dir) => Location::Dir(dir),
        None => Location::Documents,
    };
    let storage: Box<dyn TaskStorage> = if args.demo {
        Box::new(InMemoryStorage::with_seed(
            location.clone(),
            TASKS_FILE,
            seed_tasks(),
        ))
    } else if args.memory {
        Box::new(InMemoryStorage::default())
    } else {
        // Fail early on an unresolvable directory; later write errors are only logged.
        location.resolve()?;
        Box::new(JsonFileStorage)
    };

    let view = TaskListView::new(TaskStore::new(storage, location));
    ui::run(App::new(view), Duration::from_millis(args.tick_ms))
}

fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Buy milk", true),
        Task::new(2, "Water the plants", true),
        Task::new(3, "Book dentist appointment", false),
    ]
}
