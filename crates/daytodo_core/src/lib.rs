pub mod config;
pub mod day_selector;
pub mod error;
pub mod model;
pub mod storage;
pub mod task_store;

pub use day_selector::{Clock, DaySelector, FixedClock, SystemClock};
pub use error::AppError;
pub use model::{Task, TaskPatch};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use task_store::TaskStore;
