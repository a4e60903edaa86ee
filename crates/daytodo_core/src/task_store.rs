use crate::error::AppError;
use crate::model::{Task, TaskPatch, canonical_date, canonical_time, format_date, validate_text};
use crate::storage::{KeyValueStore, Persistence};
use time::{Date, OffsetDateTime};
use tracing::debug;

/// Owns the task collection and writes a full snapshot after every mutation.
///
/// Operations on an unknown id are no-ops reported as `None`; only `get`
/// treats a missing id as an error.
#[derive(Debug)]
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn open(persistence: Persistence<S>) -> Self {
        let tasks = persistence.load();
        Self { tasks, persistence }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn get(&self, id: &str) -> Result<Task, AppError> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("task '{id}' not found")))
    }

    pub fn add(&mut self, text: &str, date: &str, time: &str) -> Result<Task, AppError> {
        let text = validate_text(text)?;
        let date = canonical_date(date)?;
        let time = canonical_time(time)?;

        let task = Task {
            id: self.next_id(),
            text,
            date,
            time,
            completed: false,
        };

        self.tasks.push(task.clone());
        debug!(id = %task.id, "added task");
        self.persist();

        Ok(task)
    }

    pub fn toggle_completed(&mut self, id: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        let updated = task.clone();

        debug!(id = %updated.id, completed = updated.completed, "toggled task");
        self.persist();
        Some(updated)
    }

    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);

        debug!(id = %removed.id, "deleted task");
        self.persist();
        Some(removed)
    }

    /// Applies `patch` to the task with `id`. Validation runs before the
    /// lookup, so a rejected patch never touches the collection.
    pub fn edit(&mut self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, AppError> {
        let patch = patch.normalized()?;

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };

        if let Some(text) = patch.text {
            task.text = text;
        }
        if let Some(date) = patch.date {
            task.date = date;
        }
        if let Some(time) = patch.time {
            task.time = time;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        let updated = task.clone();

        debug!(id = %updated.id, "edited task");
        self.persist();
        Ok(Some(updated))
    }

    /// Tasks scheduled on `day`, earliest first. Equal times keep insertion
    /// order.
    pub fn project_for_day(&self, day: Date) -> Vec<Task> {
        let day = format_date(day);
        let mut projected: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.date == day)
            .cloned()
            .collect();

        // Canonical date and time strings sort chronologically.
        projected.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        projected
    }

    fn persist(&mut self) {
        self.persistence.save(&self.tasks);
    }

    fn next_id(&self) -> String {
        let mut nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        loop {
            let candidate = format!("task-{nanos}");
            if !self.tasks.iter().any(|task| task.id == candidate) {
                return candidate;
            }
            nanos += 1;
        }
    }
}
