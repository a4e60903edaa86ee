use crate::error::AppError;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    /// Canonical `YYYY-MM-DD`.
    pub date: String,
    /// Canonical 24-hour `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn scheduled_at(&self) -> Option<PrimitiveDateTime> {
        let date = parse_date(&self.date).ok()?;
        let time = parse_time(&self.time).ok()?;
        Some(PrimitiveDateTime::new(date, time))
    }

    /// Checks the record invariants: non-blank text, canonical date and time.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_text(&self.text)?;
        if format_date(parse_date(&self.date)?) != self.date {
            return Err(AppError::validation("date must be YYYY-MM-DD"));
        }
        if format_time(parse_time(&self.time)?) != self.time {
            return Err(AppError::validation("time must be HH:MM"));
        }
        Ok(())
    }
}

/// Fields replaced by an edit. `None` keeps the stored value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn text<T: Into<String>>(text: T) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.completed.is_none()
    }

    /// Returns a copy with every present field validated and canonicalized.
    pub(crate) fn normalized(&self) -> Result<TaskPatch, AppError> {
        Ok(TaskPatch {
            text: self.text.as_deref().map(validate_text).transpose()?,
            date: self.date.as_deref().map(canonical_date).transpose()?,
            time: self.time.as_deref().map(canonical_time).transpose()?,
            completed: self.completed,
        })
    }
}

pub fn validate_text(text: &str) -> Result<String, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("text is required"));
    }
    Ok(trimmed.to_string())
}

pub fn parse_date(value: &str) -> Result<Date, AppError> {
    let invalid = || AppError::validation(format!("date must be YYYY-MM-DD, got '{value}'"));
    let trimmed = value.trim();

    // `[year]` alone would also take a leading sign.
    let shaped = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid());
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

pub fn parse_time(value: &str) -> Result<Time, AppError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| AppError::validation(format!("time must be HH:MM, got '{value}'")))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn format_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub fn canonical_date(value: &str) -> Result<String, AppError> {
    parse_date(value).map(format_date)
}

pub fn canonical_time(value: &str) -> Result<String, AppError> {
    parse_time(value).map(format_time)
}
