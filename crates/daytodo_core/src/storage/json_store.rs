use super::KeyValueStore;
use crate::error::AppError;
use crate::model::Task;
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// Slot holding the JSON array of every task.
pub const TODOS_SLOT: &str = "todos";

/// Snapshot persistence for the whole task collection.
///
/// `load` and `save` never fail: storage faults are logged and degrade to an
/// empty collection or a dropped write. `try_load` and `try_save` expose the
/// underlying errors.
#[derive(Debug)]
pub struct Persistence<S> {
    backend: S,
    slot: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(backend: S) -> Self {
        Self::with_slot(backend, TODOS_SLOT)
    }

    pub fn with_slot(backend: S, slot: &str) -> Self {
        Self {
            backend,
            slot: slot.to_string(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(slot = %self.slot, error = %err, "discarding unreadable task snapshot");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<Task>, AppError> {
        let Some(raw) = self.backend.get(&self.slot)? else {
            debug!(slot = %self.slot, "no task snapshot stored");
            return Ok(Vec::new());
        };

        let tasks = decode(&raw)?;
        debug!(slot = %self.slot, count = tasks.len(), "loaded task snapshot");
        Ok(tasks)
    }

    pub fn save(&mut self, tasks: &[Task]) {
        if let Err(err) = self.try_save(tasks) {
            error!(slot = %self.slot, error = %err, "failed to write task snapshot");
        }
    }

    pub fn try_save(&mut self, tasks: &[Task]) -> Result<(), AppError> {
        let content = serde_json::to_string(tasks)?;
        self.backend.set(&self.slot, &content)?;
        debug!(slot = %self.slot, count = tasks.len(), "saved task snapshot");
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Vec<Task>, AppError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(AppError::invalid_data(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
        task.validate()
            .map_err(|err| AppError::invalid_data(format!("task '{}': {}", task.id, err.message())))?;
    }

    Ok(tasks)
}
