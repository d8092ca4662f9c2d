//! Plain-text rendering of the view model.
//!
//! Used by the terminal shim. The layout is a header with the current query
//! and status, the joke list (or the loading, error, or empty state in its
//! place), then the dialog and the notification when present.
//!
//! # Example
//!
//! ```rust
//! use jokebox::ui::{render_to_string, ViewModel};
//!
//! let text = render_to_string(&ViewModel::default(), 60);
//! assert!(text.starts_with("Joke Finder"));
//! ```

use crate::app::SearchStatus;
use crate::domain::{Joke, JokeContent, JokeKind};
use crate::ui::viewmodel::{DialogView, ViewModel};
use std::fmt::Write;

const TITLE: &str = "Joke Finder";

/// Renders `vm` to stdout.
pub fn render(vm: &ViewModel, cols: usize) {
    print!("{}", render_to_string(vm, cols));
}

/// Renders `vm` into a string, using `cols` for rules and wrapping.
#[must_use]
pub fn render_to_string(vm: &ViewModel, cols: usize) -> String {
    let mut out = String::new();
    let rule = "-".repeat(cols.max(10));

    let _ = writeln!(out, "{TITLE}  [{}]", vm.location);
    let _ = writeln!(out, "{rule}");
    if !vm.query.trim().is_empty() {
        let _ = writeln!(out, "Search: {}", vm.query.trim());
    }

    render_results(&mut out, vm);

    if let Some(dialog) = &vm.dialog {
        let _ = writeln!(out, "{rule}");
        render_dialog(&mut out, dialog);
    }

    if let Some(notification) = &vm.notification {
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "* {}", notification.message);
    }

    out
}

fn render_results(out: &mut String, vm: &ViewModel) {
    match vm.status {
        SearchStatus::Loading if vm.initial_load || vm.items.is_empty() => {
            let _ = writeln!(out, "Loading jokes...");
            return;
        }
        SearchStatus::Error => {
            let message = vm.error_message.as_deref().unwrap_or_default();
            let _ = writeln!(out, "Error: {message}");
            let _ = writeln!(out, "(type :retry to try again)");
            return;
        }
        _ => {}
    }

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "{}", empty.message);
        let _ = writeln!(out, "{}", empty.subtitle);
        return;
    }

    for (index, joke) in vm.items.iter().enumerate() {
        render_joke(out, index + 1, joke);
    }
}

fn render_joke(out: &mut String, position: usize, joke: &Joke) {
    let marker = if joke.is_local() { " (mine)" } else { "" };
    let _ = writeln!(out, "{position:>2}. [{}]{marker} #{}", joke.category, joke.id);
    match &joke.content {
        JokeContent::Single { text } => {
            let _ = writeln!(out, "    {text}");
        }
        JokeContent::TwoPart { setup, delivery } => {
            let _ = writeln!(out, "    {setup}");
            let _ = writeln!(out, "    -- {delivery}");
        }
    }
}

fn render_dialog(out: &mut String, dialog: &DialogView) {
    let _ = writeln!(out, "Add a joke ({})", dialog.draft.kind.as_str());
    match dialog.draft.kind {
        JokeKind::Single => {
            let _ = writeln!(out, "  text:     {}", dialog.draft.text);
        }
        JokeKind::TwoPart => {
            let _ = writeln!(out, "  setup:    {}", dialog.draft.setup);
            let _ = writeln!(out, "  delivery: {}", dialog.draft.delivery);
        }
    }

    if let Some(error) = &dialog.validation_error {
        let _ = writeln!(out, "  ! {error}");
    }

    let submit = if dialog.submitting {
        "submitting..."
    } else if dialog.can_submit {
        "ready to submit"
    } else {
        "submit disabled"
    };
    let _ = writeln!(out, "  [{submit}]");
}
