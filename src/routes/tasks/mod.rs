pub mod routes;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::tasks::{date, unset_date, TaskStatus};

// QUERY PARAMETERS

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub titulo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    #[serde(default = "unset_date", deserialize_with = "date::deserialize")]
    pub data: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: TaskStatus,
}

/// Path of the by-id route for a task, used as the `Location` of created tasks.
pub fn task_location(id: i32) -> String {
    format!("/Tarefa/{}", id)
}
