pub mod date;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

pub use date::{is_unset_date, unset_date};

// MODELS

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,
    #[serde(rename = "titulo")]
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    #[sqlx(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "data")]
    #[sqlx(rename = "data")]
    pub date: NaiveDateTime,
    pub status: TaskStatus,
}

/// Lifecycle state of a task, stored as its integer code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[repr(i16)]
pub enum TaskStatus {
    #[default]
    Pending = 0,
    InProgress = 1,
    Done = 2,
}

/// Body of create and update requests. An `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskPayload {
    #[serde(rename = "titulo", alias = "title", default)]
    pub title: String,
    #[serde(rename = "descricao", alias = "description", default)]
    pub description: Option<String>,
    #[serde(
        rename = "data",
        alias = "date",
        default = "unset_date",
        deserialize_with = "date::deserialize"
    )]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub status: TaskStatus,
}

/// A task that has not been given an id by the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn with_id(self, id: i32) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            status: self.status,
        }
    }
}

impl From<TaskPayload> for NewTask {
    fn from(payload: TaskPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            date: payload.date,
            status: payload.status,
        }
    }
}

impl Task {
    /// Overwrites every field except the id.
    pub fn apply(&mut self, payload: TaskPayload) {
        self.title = payload.title;
        self.description = payload.description;
        self.date = payload.date;
        self.status = payload.status;
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done];

    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        TaskStatus::ALL
            .into_iter()
            .find(|s| i64::from(s.code()) == code)
            .ok_or_else(|| format!("Unknown task status code {}", code))
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Ok(code) = raw.parse::<i64>() {
            return TaskStatus::try_from(code);
        }

        TaskStatus::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                format!(
                    "Invalid task status '{}'. Must be one of: Pending, InProgress, Done (or 0, 1, 2)",
                    raw
                )
            })
    }
}

// JSON bodies carry names or integers; query strings always arrive as text.
impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = TaskStatus;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a task status name or integer code")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TaskStatus, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TaskStatus, E> {
                TaskStatus::try_from(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TaskStatus, E> {
                let code = i64::try_from(v).map_err(E::custom)?;
                TaskStatus::try_from(code).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

// HELPER FUNCTIONS

pub fn validate_date(date: &NaiveDateTime) -> Result<(), String> {
    if is_unset_date(date) {
        return Err("A data da tarefa não pode ser vazia".to_string());
    }

    Ok(())
}

/// Returns the search term when it is present and non-empty.
pub fn validate_title_query(title: Option<&str>) -> Result<&str, String> {
    match title {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err("O título não pode estar vazio.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parses_names_and_codes() {
        assert_eq!("Pending".parse::<TaskStatus>(), Ok(TaskStatus::Pending));
        assert_eq!("inprogress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("2".parse::<TaskStatus>(), Ok(TaskStatus::Done));

        assert!("7".parse::<TaskStatus>().is_err());
        assert!("Archived".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_codes_are_stable() {
        assert_eq!(TaskStatus::Pending.code(), 0);
        assert_eq!(TaskStatus::InProgress.code(), 1);
        assert_eq!(TaskStatus::Done.code(), 2);
    }

    #[test]
    fn test_payload_accepts_portuguese_and_english_names() {
        let pt: TaskPayload = serde_json::from_value(json!({
            "titulo": "Comprar leite",
            "descricao": "No mercado",
            "data": "2024-01-01",
            "status": 1
        }))
        .unwrap();
        assert_eq!(pt.title, "Comprar leite");
        assert_eq!(pt.description.as_deref(), Some("No mercado"));
        assert_eq!(pt.status, TaskStatus::InProgress);
        assert_eq!(pt.date.to_string(), "2024-01-01 00:00:00");

        let en: TaskPayload = serde_json::from_value(json!({
            "title": "Buy milk",
            "date": "2024-01-01T09:30:00",
            "status": "Done"
        }))
        .unwrap();
        assert_eq!(en.title, "Buy milk");
        assert_eq!(en.description, None);
        assert_eq!(en.status, TaskStatus::Done);
        assert_eq!(en.date.to_string(), "2024-01-01 09:30:00");
    }

    #[test]
    fn test_payload_without_date_is_unset() {
        let payload: TaskPayload = serde_json::from_value(json!({ "titulo": "Sem data" })).unwrap();

        assert!(is_unset_date(&payload.date));
        assert_eq!(payload.status, TaskStatus::Pending);
        assert!(validate_date(&payload.date).is_err());
    }

    #[test]
    fn test_task_serializes_with_wire_names() {
        let task = NewTask {
            title: "Buy milk".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            status: TaskStatus::Pending,
        }
        .with_id(3);

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "titulo": "Buy milk",
                "descricao": null,
                "data": "2024-01-01T00:00:00",
                "status": "Pending"
            })
        );
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut task = NewTask {
            title: "old".to_string(),
            description: Some("d".to_string()),
            date: unset_date(),
            status: TaskStatus::Pending,
        }
        .with_id(9);

        let payload: TaskPayload = serde_json::from_value(json!({
            "id": 42,
            "titulo": "new",
            "data": "2024-05-05",
            "status": "Done"
        }))
        .unwrap();
        task.apply(payload);

        assert_eq!(task.id, 9);
        assert_eq!(task.title, "new");
        assert_eq!(task.description, None);
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn test_validate_title_query() {
        assert_eq!(validate_title_query(Some("milk")), Ok("milk"));
        assert!(validate_title_query(Some("")).is_err());
        assert!(validate_title_query(None).is_err());
        // whitespace is a legitimate search term
        assert_eq!(validate_title_query(Some(" ")), Ok(" "));
    }
}
