//! Response envelopes for the todo endpoints.
//!
//! Single todos are returned as `{ "todo": ... }` and lists as
//! `{ "todos": [...] }`; creation returns the bare todo.

use serde::Serialize;
use todo_db::models::todo::Todo;

/// `{ "todo": T }` envelope.
#[derive(Debug, Serialize)]
pub struct TodoEnvelope {
    pub todo: Todo,
}

/// `{ "todos": [...] }` envelope.
#[derive(Debug, Serialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}
