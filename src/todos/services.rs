use time::OffsetDateTime;

use crate::todos::dto::TodoUpdateInput;
use crate::todos::repo::{Todo, TodoStatus};

/// Applies a partial update, then recomputes `done_at` from the resulting
/// status. The recomputation happens on every update, whether or not
/// `status` was part of the payload.
pub fn apply_update(todo: &mut Todo, patch: TodoUpdateInput) {
    if let Some(title) = patch.title {
        todo.title = title;
    }
    if let Some(description) = patch.description {
        todo.description = description;
    }
    if let Some(status) = patch.status {
        todo.status = status;
    }

    todo.done_at = match todo.status {
        TodoStatus::Done => Some(OffsetDateTime::now_utc()),
        _ => None,
    };
}
