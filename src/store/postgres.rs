use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TaskFilter, TaskStore};
use crate::tasks::{NewTask, Task};

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tarefas` table if needed.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, titulo, descricao, data, status
            FROM tarefas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, titulo, descricao, data, status
            FROM tarefas
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn filter(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let query = match filter {
            // strpos keeps the match literal; LIKE would treat % and _ as wildcards
            TaskFilter::TitleContains(needle) => sqlx::query_as::<_, Task>(
                r#"
                SELECT id, titulo, descricao, data, status
                FROM tarefas
                WHERE strpos(titulo, $1) > 0
                ORDER BY id
                "#,
            )
            .bind(needle.as_str()),
            TaskFilter::OnDay(day) => sqlx::query_as::<_, Task>(
                r#"
                SELECT id, titulo, descricao, data, status
                FROM tarefas
                WHERE data::date = $1
                ORDER BY id
                "#,
            )
            .bind(*day),
            TaskFilter::Status(status) => sqlx::query_as::<_, Task>(
                r#"
                SELECT id, titulo, descricao, data, status
                FROM tarefas
                WHERE status = $1
                ORDER BY id
                "#,
            )
            .bind(*status),
        };

        let tasks = query.fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tarefas (titulo, descricao, data, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, titulo, descricao, data, status
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.date)
        .bind(task.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tarefas
            SET titulo = $2, descricao = $3, data = $4, status = $5
            WHERE id = $1
            RETURNING id, titulo, descricao, data, status
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.date)
        .bind(task.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tarefas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
