//! Blog controller: the handlers behind the blog routes.
//!
//! DESIGN
//! ======
//! Routes only match method and path; everything else (validation, storage,
//! what counts as a guide post) lives behind `BlogController`. `MemoryBlogs`
//! is the in-process implementation the server runs with; a database-backed
//! controller slots in through the same trait.

#[cfg(test)]
#[path = "blog_test.rs"]
mod blog_test;

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const GUIDE_CATEGORY: &str = "guide";
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("invalid blog post: {0}")]
    Invalid(String),
    #[error("blog post not found: {0}")]
    NotFound(Uuid),
    #[error("blog store unavailable: {0}")]
    Unavailable(String),
}

/// Stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Body of `POST /post`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of `POST /guideblogs`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuideQuery {
    /// Keep posts sharing at least one of these tags.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[async_trait]
pub trait BlogController: Send + Sync {
    async fn post_blog(&self, draft: NewBlogPost) -> Result<BlogPost, BlogError>;
    async fn fetch_all_blogs(&self) -> Result<Vec<BlogPost>, BlogError>;
    async fn fetch_guide_blogs(&self, query: GuideQuery) -> Result<Vec<BlogPost>, BlogError>;
}

// =============================================================================
// IN-MEMORY CONTROLLER
// =============================================================================

#[derive(Default)]
pub struct MemoryBlogs {
    posts: RwLock<Vec<BlogPost>>,
}

impl MemoryBlogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogController for MemoryBlogs {
    async fn post_blog(&self, draft: NewBlogPost) -> Result<BlogPost, BlogError> {
        let post = build_post(draft, now_ms())?;
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn fetch_all_blogs(&self) -> Result<Vec<BlogPost>, BlogError> {
        let mut posts = self.posts.read().await.clone();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn fetch_guide_blogs(&self, query: GuideQuery) -> Result<Vec<BlogPost>, BlogError> {
        let mut posts: Vec<BlogPost> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| is_guide_match(p, &query.tags))
            .cloned()
            .collect();
        newest_first(&mut posts);
        if let Some(limit) = query.limit {
            posts.truncate(limit);
        }
        Ok(posts)
    }
}

/// Validate a draft and assign id + timestamp.
pub(crate) fn build_post(draft: NewBlogPost, created_at: i64) -> Result<BlogPost, BlogError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(BlogError::Invalid("title is required".into()));
    }
    if draft.content.trim().is_empty() {
        return Err(BlogError::Invalid("content is required".into()));
    }

    let category = draft
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_ascii_lowercase();

    Ok(BlogPost {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        content: draft.content,
        author: draft.author.filter(|a| !a.trim().is_empty()),
        category,
        tags: draft.tags.into_iter().map(|t| t.trim().to_owned()).filter(|t| !t.is_empty()).collect(),
        created_at,
    })
}

pub(crate) fn is_guide_match(post: &BlogPost, tags: &[String]) -> bool {
    post.category == GUIDE_CATEGORY && (tags.is_empty() || post.tags.iter().any(|t| tags.contains(t)))
}

fn newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
