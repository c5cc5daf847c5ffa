use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use models::todo::{Todo, TodoCreate, TodoUpdate};
use service::{errors::ServiceError, storage::todo_store::TodoStore};

use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub first_n: Option<i64>,
}

/// List todos in insertion order, optionally only the first `first_n`.
pub async fn list(
    State(store): State<Arc<TodoStore>>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Todo>>, JsonApiError> {
    match store.list(q.first_n).await {
        Ok(list) => {
            info!(count = list.len(), "list todos");
            Ok(Json(list))
        }
        Err(e @ ServiceError::InvalidArgument(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid Argument",
            Some(e.to_string()),
        )),
        Err(e) => Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "List Failed",
            Some(e.to_string()),
        )),
    }
}

/// Fetch a single todo by id.
pub async fn get(
    State(store): State<Arc<TodoStore>>,
    Path(todo_id): Path<i64>,
) -> Result<Json<Todo>, JsonApiError> {
    match store.get(todo_id).await {
        Some(todo) => Ok(Json(todo)),
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("Todo not found.".into()),
        )),
    }
}

/// Create a new todo; the store assigns the id.
pub async fn create(
    State(store): State<Arc<TodoStore>>,
    Json(input): Json<TodoCreate>,
) -> Result<Json<Todo>, JsonApiError> {
    match store.create(input).await {
        Ok(todo) => {
            info!(todo_id = todo.todo_id, priority = u8::from(todo.priority), "created todo");
            Ok(Json(todo))
        }
        Err(e) => match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => Err(JsonApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                Some(e.to_string()),
            )),
            _ => {
                error!(err = %e, "create todo failed");
                Err(JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Create Failed",
                    Some(e.to_string()),
                ))
            }
        },
    }
}

/// Partially update an existing todo; omitted fields keep their values.
pub async fn update(
    State(store): State<Arc<TodoStore>>,
    Path(todo_id): Path<i64>,
    Json(patch): Json<TodoUpdate>,
) -> Result<Json<Todo>, JsonApiError> {
    match store.update(todo_id, patch).await {
        Ok(todo) => {
            info!(todo_id = todo.todo_id, "updated todo");
            Ok(Json(todo))
        }
        Err(e) => match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => Err(JsonApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                Some(e.to_string()),
            )),
            ServiceError::NotFound(_) => Err(JsonApiError::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                Some(e.to_string()),
            )),
            _ => {
                error!(err = %e, "update todo failed");
                Err(JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Update Failed",
                    Some(e.to_string()),
                ))
            }
        },
    }
}

/// Delete a todo and return its final state.
pub async fn delete(
    State(store): State<Arc<TodoStore>>,
    Path(todo_id): Path<i64>,
) -> Result<Json<Todo>, JsonApiError> {
    match store.delete(todo_id).await {
        Some(todo) => {
            info!(todo_id, "deleted todo");
            Ok(Json(todo))
        }
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("Todo not found.".into()),
        )),
    }
}
