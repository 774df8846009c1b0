//! Search input controller.

use tokio::sync::watch;

/// Owns the raw search text as typed by the user.
///
/// Setting the text is a plain assignment; observers obtained through
/// [`SearchInput::subscribe`] see every change. Assigning the text already
/// held is not a change.
#[derive(Debug)]
pub struct SearchInput {
    text: watch::Sender<String>,
}

impl SearchInput {
    /// Creates an input holding `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        let (text, _) = watch::channel(initial.into());
        Self { text }
    }

    /// Current search text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replaces the search text.
    pub fn set(&self, text: impl Into<String>) {
        let text = text.into();
        self.text.send_if_modified(|current| {
            if *current == text {
                false
            } else {
                *current = text;
                true
            }
        });
    }

    /// Receiver observing every change of the search text.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_is_plain_assignment() {
        let input = SearchInput::default();
        assert_eq!(input.text(), "");

        input.set("  Alien: Résurrection  ");
        assert_eq!(input.text(), "  Alien: Résurrection  ");
    }

    #[test]
    fn test_same_value_does_not_notify() {
        let input = SearchInput::new("dune");
        let mut observer = input.subscribe();

        input.set("dune");
        assert!(!observer.has_changed().unwrap());

        input.set("dune 2");
        assert!(observer.has_changed().unwrap());
        assert_eq!(*observer.borrow_and_update(), "dune 2");
    }
}
