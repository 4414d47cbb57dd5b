//! Todo View
//!
//! In-memory state of the single todo page and the transitions that act on it.
//!
//! ## Data Flow
//!
//! 1. A user intent becomes a [`Command`] (`TodoView::submit`, `TodoView::toggle`, ...)
//! 2. `TodoView::start` marks the command as started (loading flag)
//! 3. `Command::execute` performs the HTTP call and yields an [`Event`]
//! 4. `TodoView::apply` folds the event into the state
//!
//! Steps 1, 2 and 4 happen on the task that owns the view. Step 3 may run on
//! any task, so several commands can be in flight at once. Events are applied
//! in the order they arrive, and the last response wins.

mod render;

pub use render::render;

use std::fmt;

use crate::api::TodoApi;
use crate::todo::{NewTodo, Todo, TodoId, TodoUpdate};

/// User-visible operations, used for logging and loading bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadAll,
    LoadSample,
    Create,
    Toggle,
    Delete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::LoadAll => "load_todos",
            Operation::LoadSample => "load_sample_todos",
            Operation::Create => "add_todo",
            Operation::Toggle => "toggle_done",
            Operation::Delete => "remove_todo",
        }
    }

    /// List operations drive the loading flag
    pub fn is_list(&self) -> bool {
        matches!(self, Operation::LoadAll | Operation::LoadSample)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A backend request ready to be executed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadAll,
    LoadSample,
    Create(NewTodo),
    Update { id: TodoId, update: TodoUpdate },
    Delete(TodoId),
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::LoadAll => Operation::LoadAll,
            Command::LoadSample => Operation::LoadSample,
            Command::Create(_) => Operation::Create,
            Command::Update { .. } => Operation::Toggle,
            Command::Delete(_) => Operation::Delete,
        }
    }

    /// Run the request against `api`
    ///
    /// Never fails: errors are logged here and reported as `Event::Settled`,
    /// which leaves the list untouched.
    pub async fn execute(self, api: &dyn TodoApi) -> Event {
        let operation = self.operation();

        let result = match self {
            Command::LoadAll => api.list().await.map(Event::Listed),
            Command::LoadSample => api.health().await.map(|health| match health.todos {
                Some(todos) => Event::Listed(todos),
                None => {
                    tracing::debug!(status = ?health.status, "Health response has no todos array");
                    Event::Settled(operation)
                }
            }),
            Command::Create(todo) => api.create(&todo).await.map(Event::Created),
            Command::Update { id, update } => api.update(&id, &update).await.map(Event::Updated),
            Command::Delete(id) => {
                let result = api.delete(&id).await;
                result.map(|()| Event::Deleted(id))
            }
        };

        result.unwrap_or_else(|error| {
            let kind = if error.is_transport() {
                "transport"
            } else {
                "protocol"
            };
            tracing::error!(
                operation = operation.name(),
                kind,
                "{} failed: {}",
                operation,
                error
            );
            Event::Settled(operation)
        })
    }
}

/// Outcome of an executed command
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A list operation succeeded, replace everything
    Listed(Vec<Todo>),
    /// The backend created a todo
    Created(Todo),
    /// The backend updated a todo
    Updated(Todo),
    /// The backend deleted a todo
    Deleted(TodoId),
    /// The operation finished without changing the list (failure, or a
    /// sample response without todos)
    Settled(Operation),
}

/// State of the todo page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoView {
    todos: Vec<Todo>,
    draft: String,
    loading: bool,
}

impl TodoView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already known list
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Current contents of the new-todo input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, title: impl Into<String>) {
        self.draft = title.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Resolve a user reference: a 1-based row number first, then a literal id
    pub fn resolve(&self, reference: &str) -> Option<TodoId> {
        let reference = reference.trim();

        if let Ok(row) = reference.parse::<usize>() {
            if let Some(todo) = row.checked_sub(1).and_then(|i| self.todos.get(i)) {
                return Some(todo.id.clone());
            }
        }

        self.todos
            .iter()
            .find(|t| t.id.to_string() == reference)
            .map(|t| t.id.clone())
    }

    /// Create command for the current draft, `None` if it is blank
    pub fn submit(&self) -> Option<Command> {
        let title = self.draft.trim();
        if title.is_empty() {
            return None;
        }

        Some(Command::Create(NewTodo {
            title: title.to_string(),
        }))
    }

    /// Update command flipping `done` on the item as it is right now
    pub fn toggle(&self, id: &TodoId) -> Option<Command> {
        let todo = self.get(id)?;
        Some(Command::Update {
            id: todo.id.clone(),
            update: todo.toggled(),
        })
    }

    /// Mark a command as started
    pub fn start(&mut self, command: &Command) {
        if command.operation().is_list() {
            self.loading = true;
        }
    }

    /// Fold a command outcome into the state
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Listed(todos) => {
                self.todos = todos;
                self.loading = false;
            }
            Event::Created(todo) => {
                self.todos.insert(0, todo);
                self.draft.clear();
            }
            Event::Updated(todo) => {
                for slot in self.todos.iter_mut().filter(|t| t.id == todo.id) {
                    *slot = todo.clone();
                }
            }
            Event::Deleted(id) => self.todos.retain(|t| t.id != id),
            Event::Settled(operation) => {
                if operation.is_list() {
                    self.loading = false;
                }
            }
        }
    }

    /// Start, execute and apply a command in one go
    pub async fn dispatch(&mut self, api: &dyn TodoApi, command: Command) {
        self.start(&command);
        let event = command.execute(api).await;
        self.apply(event);
    }
}
