/// Models module
/// Data types shared between window content and the shell.
/// Anything crossing IPC is serializable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Window roles the shell tracks as singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowRole {
    Main,
    Term,
    Factory,
}

impl WindowRole {
    pub fn label(&self) -> &'static str {
        match self {
            WindowRole::Main => "main",
            WindowRole::Term => "term",
            WindowRole::Factory => "factory",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "main" => Some(WindowRole::Main),
            "term" => Some(WindowRole::Term),
            "factory" => Some(WindowRole::Factory),
            _ => None,
        }
    }
}

/// Content a window can load, with its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Term,
    Repl,
    Factory,
    Prompt,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Term => "term.html",
            Page::Repl => "repl.html",
            Page::Factory => "factory.html",
            Page::Prompt => "modalVar.html",
        }
    }

    /// Logical (width, height)
    pub fn size(&self) -> (f64, f64) {
        match self {
            Page::Index => (1240.0, 700.0),
            Page::Term => (640.0, 560.0),
            Page::Repl => (640.0, 515.0),
            Page::Factory => (1066.0, 640.0),
            Page::Prompt => (360.0, 135.0),
        }
    }

    pub fn resizable(&self) -> bool {
        matches!(self, Page::Index | Page::Factory)
    }

    /// Console and prompt windows behave as modals over the main window.
    pub fn modal(&self) -> bool {
        matches!(self, Page::Term | Page::Repl | Page::Prompt)
    }

    /// Singleton role, `None` for per-request prompt windows.
    pub fn role(&self) -> Option<WindowRole> {
        match self {
            Page::Index => Some(WindowRole::Main),
            Page::Term | Page::Repl => Some(WindowRole::Term),
            Page::Factory => Some(WindowRole::Factory),
            Page::Prompt => None,
        }
    }
}

/// Identifier of one prompt request. Its window is labelled `prompt-<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptId(pub u32);

impl PromptId {
    const PREFIX: &'static str = "prompt-";

    pub fn window_label(&self) -> String {
        format!("{}{}", Self::PREFIX, self.0)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        label
            .strip_prefix(Self::PREFIX)
            .and_then(|id| id.parse().ok())
            .map(PromptId)
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a prompt window shows: field label, initial value, confirm button text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOptions {
    pub label: String,
    pub value: String,
    pub ok: String,
}

impl PromptOptions {
    /// Text prompt with an empty initial value and an "OK" button.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            ok: "OK".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_options_serialize_in_field_order() {
        let json = serde_json::to_string(&PromptOptions::labelled("X")).unwrap();
        assert_eq!(json, r#"{"label":"X","value":"","ok":"OK"}"#);
    }

    #[test]
    fn test_prompt_id_label_round_trip() {
        let id = PromptId(7);
        assert_eq!(id.window_label(), "prompt-7");
        assert_eq!(PromptId::from_label("prompt-7"), Some(id));
        assert_eq!(PromptId::from_label("prompt-"), None);
        assert_eq!(PromptId::from_label("term"), None);
    }

    #[test]
    fn test_repl_and_term_share_a_role() {
        assert_eq!(Page::Term.role(), Some(WindowRole::Term));
        assert_eq!(Page::Repl.role(), Some(WindowRole::Term));
        assert_eq!(Page::Prompt.role(), None);
    }

    #[test]
    fn test_role_labels() {
        for role in [WindowRole::Main, WindowRole::Term, WindowRole::Factory] {
            assert_eq!(WindowRole::from_label(role.label()), Some(role));
        }
        assert_eq!(WindowRole::from_label("prompt-1"), None);
    }
}
