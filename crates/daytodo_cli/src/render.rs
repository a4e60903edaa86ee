use daytodo_core::config::Palette;
use daytodo_core::error::AppError;
use daytodo_core::model::{Task, parse_time};
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::Date;
use time::macros::format_description;

#[derive(Tabled)]
struct TaskRow<'a> {
    #[tabled(rename = "")]
    done: &'static str,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "ID")]
    id: &'a str,
}

/// `January 1, 2024`.
pub fn day_label(day: Date) -> String {
    day.format(format_description!(
        "[month repr:long] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| day.to_string())
}

/// `9:00 AM`; falls back to the stored value when it does not parse.
pub fn time_label(time: &str) -> String {
    parse_time(time)
        .ok()
        .and_then(|parsed| {
            parsed
                .format(format_description!(
                    "[hour repr:12 padding:none]:[minute] [period]"
                ))
                .ok()
        })
        .unwrap_or_else(|| time.to_string())
}

pub fn day_listing(day: Date, tasks: &[Task], palette: &Palette) -> String {
    let header = palette.accentize(&day_label(day));
    if tasks.is_empty() {
        return format!(
            "{header}\n{}",
            palette.mutedize(&format!("No todos for {}.", day_label(day)))
        );
    }

    let rows = tasks.iter().map(|task| {
        let time = time_label(&task.time);
        if task.completed {
            TaskRow {
                done: "[x]",
                time: palette.mutedize(&time),
                text: palette.mutedize(&task.text),
                id: &task.id,
            }
        } else {
            TaskRow {
                done: "[ ]",
                time,
                text: task.text.clone(),
                id: &task.id,
            }
        }
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{header}\n{table}")
}

pub fn task_line(task: &Task) -> String {
    format!("{} ({}) on {} at {}", task.text, task.id, task.date, task.time)
}

pub fn task_json(task: &Task) -> Result<Value, AppError> {
    Ok(serde_json::to_value(task)?)
}

pub fn tasks_json(tasks: &[Task]) -> Result<Value, AppError> {
    Ok(serde_json::to_value(tasks)?)
}
