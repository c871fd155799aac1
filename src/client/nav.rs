//! Route navigation seam.
//!
//! The profile page only ever navigates home; what "navigate" means (browser
//! history, a TUI screen switch, a test recorder) belongs to the embedder.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::sync::{Arc, Mutex, PoisonError};

pub const HOME_ROUTE: &str = "/";

pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str);
}

/// Navigator that records every route it is sent to.
#[derive(Clone, Debug, Default)]
pub struct History {
    visited: Arc<Mutex<Vec<String>>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.visited().last().cloned()
    }
}

impl Navigator for History {
    fn navigate(&self, to: &str) {
        tracing::debug!(to, "navigate");
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(to.to_owned());
    }
}
