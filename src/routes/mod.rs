use axum::{
    routing::{get, post},
    Router,
};

mod health;
mod tasks;
#[cfg(test)]
mod test_support;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // Literal segments take priority over `{id}`, so the search routes never
    // reach the by-id handler.
    let task_router = Router::new()
        .route("/Tarefa", post(tasks::routes::create))
        .route("/Tarefa/ObterTodos", get(tasks::routes::list))
        .route("/Tarefa/ObterPorTitulo", get(tasks::routes::by_title))
        .route("/Tarefa/ObterPorData", get(tasks::routes::by_date))
        .route("/Tarefa/ObterPorStatus", get(tasks::routes::by_status))
        .route(
            "/Tarefa/{id}",
            get(tasks::routes::get)
                .put(tasks::routes::update)
                .delete(tasks::routes::delete),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health))
        .merge(task_router)
}

async fn root() -> &'static str {
    "Tarefas API"
}
