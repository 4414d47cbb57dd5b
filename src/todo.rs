//! Todo data types
//!
//! This module defines the records exchanged with the todo backend:
//! - `Todo`: A single list item
//! - `TodoId`: The backend's opaque identifier
//! - `NewTodo`, `TodoUpdate`: Request bodies for create and update
//! - `HealthResponse`: The sample set returned by the health endpoint

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque todo identifier
///
/// The backend decides the representation. Hex uuids arrive as strings,
/// some deployments use plain integers. Ids compare by value and are never
/// interpreted beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(i64),
    Text(String),
}

impl TodoId {
    /// Percent-encoded form for use as a URL path segment
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{}", n),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::Number(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId::Text(s)
    }
}

/// A single todo item as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub done: bool,
}

impl Todo {
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done: false,
        }
    }

    /// Builder method: set the done flag
    pub fn done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Body for a PUT that flips this item's done flag
    pub fn toggled(&self) -> TodoUpdate {
        TodoUpdate {
            title: self.title.clone(),
            done: !self.done,
        }
    }
}

/// POST body for creating a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
}

/// PUT body for updating a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub title: String,
    pub done: bool,
}

/// Response of the health endpoint
///
/// `todos` is `None` unless the backend sent an actual JSON array there.
/// `status` is kept as whatever JSON the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "array_or_none")]
    pub todos: Option<Vec<Todo>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn array_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<Todo>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_array() {
        serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}
