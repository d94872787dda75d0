use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::todos::dto::TodoFilter;

/// Lifecycle of a todo item, stored as the `todo_status` Postgres enum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "todo_status", rename_all = "lowercase")]
pub enum TodoStatus {
    Draft,
    #[default]
    Todo,
    Doing,
    Done,
    Trash,
}

/// Todo record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub done_at: Option<OffsetDateTime>,
    pub user_id: Uuid,
}

impl Todo {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        status: TodoStatus,
    ) -> anyhow::Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, status, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, created_at, updated_at, done_at, user_id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(todo)
    }

    /// Owner-scoped listing. Title and description filters are
    /// case-sensitive substring matches, status is exact; absent fields
    /// impose no constraint.
    pub async fn list_by_owner(
        db: &PgPool,
        user_id: Uuid,
        filter: &TodoFilter,
    ) -> anyhow::Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, status, created_at, updated_at, done_at, user_id
            FROM todos
            WHERE user_id = $1
              AND ($2::text IS NULL OR title LIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR description LIKE '%' || $3 || '%')
              AND ($4::todo_status IS NULL OR status = $4)
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .bind(filter.title.as_deref())
        .bind(filter.description.as_deref())
        .bind(filter.status)
        .fetch_all(db)
        .await?;
        Ok(todos)
    }

    /// A todo that exists under a different owner is indistinguishable
    /// from one that does not exist.
    pub async fn find_by_owner(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, status, created_at, updated_at, done_at, user_id
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(todo)
    }

    pub async fn update(db: &PgPool, todo: &Todo) -> anyhow::Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $3, description = $4, status = $5, done_at = $6, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, status, created_at, updated_at, done_at, user_id
            "#,
        )
        .bind(todo.id)
        .bind(todo.user_id)
        .bind(&todo.title)
        .bind(todo.description.as_deref())
        .bind(todo.status)
        .bind(todo.done_at)
        .fetch_one(db)
        .await?;
        Ok(todo)
    }

    pub async fn delete_by_owner(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM todos WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
