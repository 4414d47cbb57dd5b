//! # Todos
//!
//! A single-page terminal view of a todo list backed by a remote REST API.
//!
//! The page lists todos and lets the user create, toggle and delete them.
//! Every action is one HTTP call. The list only changes once the backend
//! confirms, and failures are logged and otherwise ignored.
//!
//! ## Modules
//!
//! - [`todo`]: The `Todo` record and request bodies
//! - [`api`]: `TodoApi` trait and the reqwest-backed `TodoClient`
//! - [`view`]: Page state, commands, events and rendering
//! - [`session`]: Interactive event loop over stdin/stdout
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use todos::api::TodoClient;
//! use todos::view::{render, Command, TodoView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TodoClient::new("http://127.0.0.1:5000/api/todos")?;
//!     let mut view = TodoView::new();
//!
//!     view.dispatch(&client, Command::LoadAll).await;
//!
//!     view.set_draft("buy milk");
//!     if let Some(create) = view.submit() {
//!         view.dispatch(&client, create).await;
//!     }
//!
//!     print!("{}", render(&view, "http://127.0.0.1:5000/api/todos"));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod todo;
pub mod view;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, TodoApi, TodoClient};
pub use config::{Config, ConfigError, LoadedConfig, LogFormat, LoggingConfig};
pub use session::{Action, Session};
pub use todo::{HealthResponse, NewTodo, Todo, TodoId, TodoUpdate};
pub use view::{Command, Event, Operation, TodoView};
