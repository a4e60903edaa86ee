use crate::cli::Command;
use crate::render;
use daytodo_core::config::Palette;
use daytodo_core::day_selector::{Clock, DaySelector, local_offset};
use daytodo_core::error::AppError;
use daytodo_core::model::{TaskPatch, format_date, format_time, parse_date};
use daytodo_core::storage::KeyValueStore;
use daytodo_core::task_store::TaskStore;
use std::io::Write;
use time::{Date, OffsetDateTime};

/// Drives the task store from parsed commands and renders the results.
///
/// The day selector lives as long as the session, so in interactive mode
/// `prev`/`next`/`today` change the day that `list` and `add` default to.
pub struct Session<S: KeyValueStore, C: Clock> {
    store: TaskStore<S>,
    selector: DaySelector<C>,
    palette: Palette,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    pub fn new(store: TaskStore<S>, selector: DaySelector<C>, palette: Palette) -> Self {
        Self {
            store,
            selector,
            palette,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn selected_day(&self) -> Date {
        self.selector.current()
    }

    pub fn run<W: Write>(
        &mut self,
        command: Command,
        json: bool,
        out: &mut W,
    ) -> Result<(), AppError> {
        match command {
            Command::Add { text, date, time } => {
                let text = text.unwrap_or_default();
                let date = date.unwrap_or_else(|| format_date(self.selector.current()));
                let time = time.unwrap_or_else(current_time);

                let task = self.store.add(&text, &date, &time)?;
                if json {
                    writeln!(out, "{}", render::task_json(&task)?)?;
                } else {
                    writeln!(out, "Added task: {}", render::task_line(&task))?;
                }
            }
            Command::Toggle { id } => {
                let id = required_id(&id)?;
                match self.store.toggle_completed(id) {
                    Some(task) if json => writeln!(out, "{}", render::task_json(&task)?)?,
                    Some(task) if task.completed => {
                        writeln!(out, "Completed task: {}", render::task_line(&task))?
                    }
                    Some(task) => writeln!(out, "Reopened task: {}", render::task_line(&task))?,
                    None => self.report_missing(id, json, out)?,
                }
            }
            Command::Delete { id } => {
                let id = required_id(&id)?;
                match self.store.delete(id) {
                    Some(task) if json => writeln!(out, "{}", render::task_json(&task)?)?,
                    Some(task) => writeln!(out, "Deleted task: {}", render::task_line(&task))?,
                    None => self.report_missing(id, json, out)?,
                }
            }
            Command::Edit {
                id,
                text,
                date,
                time,
            } => {
                let id = required_id(&id)?;
                let patch = TaskPatch {
                    text,
                    date,
                    time,
                    completed: None,
                };
                if patch.is_empty() {
                    return Err(AppError::validation(
                        "edit needs at least one of --text, --date or --time",
                    ));
                }

                match self.store.edit(id, &patch)? {
                    Some(task) if json => writeln!(out, "{}", render::task_json(&task)?)?,
                    Some(task) => writeln!(out, "Updated task: {}", render::task_line(&task))?,
                    None => self.report_missing(id, json, out)?,
                }
            }
            Command::List { day } => {
                let day = match day {
                    Some(value) => parse_date(&value)?,
                    None => self.selector.current(),
                };
                self.list(day, json, out)?;
            }
            Command::Prev => {
                let day = self.selector.previous();
                self.list(day, json, out)?;
            }
            Command::Next => {
                let day = self.selector.next();
                self.list(day, json, out)?;
            }
            Command::Today => {
                let day = self.selector.today();
                self.list(day, json, out)?;
            }
        }

        Ok(())
    }

    fn list<W: Write>(&self, day: Date, json: bool, out: &mut W) -> Result<(), AppError> {
        let tasks = self.store.project_for_day(day);
        if json {
            writeln!(out, "{}", render::tasks_json(&tasks)?)?;
        } else {
            writeln!(out, "{}", render::day_listing(day, &tasks, &self.palette))?;
        }
        Ok(())
    }

    fn report_missing<W: Write>(
        &self,
        id: &str,
        json: bool,
        out: &mut W,
    ) -> Result<(), AppError> {
        if json {
            writeln!(out, "null")?;
        } else {
            writeln!(out, "No task with id {id}")?;
        }
        Ok(())
    }
}

fn required_id(id: &str) -> Result<&str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("id is required"));
    }
    Ok(trimmed)
}

fn current_time() -> String {
    format_time(OffsetDateTime::now_utc().to_offset(local_offset()).time())
}
