//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the blog controller behind a trait object so routes never know
//! which store backs them.

use std::sync::Arc;

use crate::services::blog::{BlogController, MemoryBlogs};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogController>,
}

impl AppState {
    #[must_use]
    pub fn new(blogs: Arc<dyn BlogController>) -> Self {
        Self { blogs }
    }

    /// State backed by the in-process blog store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBlogs::new()))
    }
}
