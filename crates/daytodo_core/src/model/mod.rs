mod task;

pub use task::{
    Task, TaskPatch, canonical_date, canonical_time, format_date, format_time, parse_date,
    parse_time, validate_text,
};
