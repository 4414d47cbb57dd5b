//! Text rendering of the todo page

use super::TodoView;

const TITLE: &str = "Simple Todos";

/// Render the whole page
///
/// The list area shows `Loading...` while a list request is in flight,
/// `No todos yet.` when empty, and one numbered row per todo otherwise.
pub fn render(view: &TodoView, base_url: &str) -> String {
    let mut lines = vec![TITLE.to_string(), "=".repeat(TITLE.len())];

    if !view.draft().is_empty() {
        lines.push(format!("New todo: {}", view.draft()));
    }
    lines.push(String::new());

    if view.is_loading() {
        lines.push("Loading...".to_string());
    } else if view.todos().is_empty() {
        lines.push("No todos yet.".to_string());
    } else {
        for (i, todo) in view.todos().iter().enumerate() {
            let mark = if todo.done { 'x' } else { ' ' };
            lines.push(format!("{:>3}. [{}] {}  ({})", i + 1, mark, todo.title, todo.id));
        }
    }

    lines.push(String::new());
    lines.push(format!("This view talks to {}", base_url));

    let mut page = lines.join("\n");
    page.push('\n');
    page
}
