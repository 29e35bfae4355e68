use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::{task_location, DateQuery, StatusQuery, TitleQuery};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::TaskFilter;
use crate::tasks::{validate_date, validate_title_query, NewTask, TaskPayload};

/// Get a single task by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.store.find_by_id(id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::not_found()),
    }
}

/// List every task, or 204 when there are none
pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let tasks = state.store.all().await?;

    if tasks.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(tasks).into_response())
}

/// Search tasks whose title contains the given text
pub async fn by_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let title = validate_title_query(query.titulo.as_deref()).map_err(ApiError::BadRequest)?;

    let tasks = state
        .store
        .filter(&TaskFilter::TitleContains(title.to_string()))
        .await?;

    if tasks.is_empty() {
        return Err(ApiError::not_found_with(
            "Nenhuma tarefa encontrada com o título fornecido.",
        ));
    }

    Ok(Json(tasks))
}

/// Tasks dated on the given calendar day. An empty result is still a 200.
pub async fn by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = state
        .store
        .filter(&TaskFilter::OnDay(query.data.date()))
        .await?;

    Ok(Json(tasks))
}

/// Tasks with exactly the given status
pub async fn by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = state
        .store
        .filter(&TaskFilter::Status(query.status))
        .await?;

    if tasks.is_empty() {
        return Err(ApiError::not_found_with(
            "Nenhuma tarefa encontrada com o status fornecido.",
        ));
    }

    Ok(Json(tasks))
}

/// Create a new task
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    validate_date(&payload.date).map_err(ApiError::BadRequest)?;

    let task = state
        .store
        .insert(NewTask::from(payload))
        .await
        .map_err(|e| {
            error!("Failed to save task: {}", e);
            ApiError::Internal(format!("Erro ao salvar a tarefa: {}", e))
        })?;

    info!(id = task.id, "task created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, task_location(task.id))],
        Json(task),
    ))
}

/// Overwrite every field of an existing task except its id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // A body that does not parse is rejected before the lookup.
    let Json(payload) = payload?;

    let mut task = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    validate_date(&payload.date).map_err(ApiError::BadRequest)?;

    task.apply(payload);

    // Gone between the lookup and the write: another request deleted it.
    let updated = state
        .store
        .update(task)
        .await?
        .ok_or_else(ApiError::not_found)?;

    info!(id, "task updated");

    Ok(Json(updated))
}

/// Delete a task
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.delete(id).await? {
        return Err(ApiError::not_found());
    }

    info!(id, "task deleted");

    Ok(StatusCode::NO_CONTENT)
}
