use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Required `?userId=N` query parameter; its absence rejects the request
/// with 400 before the handler runs.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScope {
    pub user_id: i64,
}

pub struct Store {
    todos: RwLock<HashMap<i64, Todo>>,
    next_id: AtomicI64,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    let db: Db = Arc::new(Store {
        todos: RwLock::new(HashMap::new()),
        next_id: AtomicI64::new(1),
    });
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>, Query(scope): Query<UserScope>) -> Json<Vec<Todo>> {
    let todos = db.todos.read().await;
    let mut owned: Vec<Todo> = todos
        .values()
        .filter(|t| t.user_id == scope.user_id)
        .cloned()
        .collect();
    owned.sort_by_key(|t| t.id);
    Json(owned)
}

async fn create_todo(
    State(db): State<Db>,
    Query(scope): Query<UserScope>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: db.next_id.fetch_add(1, Ordering::Relaxed),
        user_id: scope.user_id,
        title: input.title,
        completed: input.completed,
    };
    db.todos.write().await.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(scope): Query<UserScope>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.todos.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    // A todo owned by another user is indistinguishable from a missing one.
    if todo.user_id != scope.user_id {
        return Err(StatusCode::NOT_FOUND);
    }
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(scope): Query<UserScope>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.todos.write().await;
    match todos.get(&id) {
        Some(todo) if todo.user_id == scope.user_id => {
            todos.remove(&id);
            Ok(StatusCode::NO_CONTENT)
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}
