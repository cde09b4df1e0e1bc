use dioxus::prelude::*;

use crate::app::use_view;
use crate::icons::FaTriangleExclamation;
use crate::Icon;

/// Messages shown in the error panel, oldest first. Cleared on every refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorLog {
    entries: Vec<String>,
}

impl ErrorLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[component]
pub fn ErrorPanel() -> Element {
    let view = use_view();
    let errors = view().errors.clone();

    if errors.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "error-panel",
            class: "error-panel",
            role: "alert",
            for (i, message) in errors.entries().iter().enumerate() {
                p {
                    key: "{i}",
                    class: "error-panel-entry",
                    Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                    span { " {message}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_until_cleared() {
        let mut log = ErrorLog::default();
        log.push("Please fill in your name.");
        log.push(String::from("Location required to log in."));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], "Please fill in your name.");

        log.clear();
        assert!(log.is_empty());
    }
}
