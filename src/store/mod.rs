//! Persistence for the post collection.
//!
//! The collection is an ordered list of posts, newest first by insertion.
//! Every operation reads the whole collection and every mutation writes it
//! back in full.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{model::Post, sanitize};

/// A shared handle to the configured store.
pub type Store = Arc<dyn PostStore>;

/// An error that can occur while persisting posts.
///
/// Listing never fails: an unreadable collection is treated as empty. A
/// mutation refuses to overwrite a file it could not read.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("failed to access posts file: {0}")]
	Io(#[from] std::io::Error),
	#[error("failed to encode posts: {0}")]
	Serialize(#[from] serde_json::Error),
	#[error("posts file is not a JSON array: {0}")]
	Corrupt(serde_json::Error),
}

/// The fields of a post supplied by the author.
#[derive(Debug, Clone)]
pub struct NewPost {
	pub title: String,
	pub content: String,
}

impl NewPost {
	/// Normalises author input: the title is trimmed and, when `sanitize` is
	/// set, both fields are HTML-escaped before they are stored.
	pub fn new(title: &str, content: &str, sanitize: bool) -> Self {
		let title = title.trim();

		if sanitize {
			Self {
				title: sanitize::escape(title),
				content: sanitize::escape(content),
			}
		} else {
			Self {
				title: title.to_owned(),
				content: content.to_owned(),
			}
		}
	}
}

/// Storage for the post collection.
#[axum::async_trait]
pub trait PostStore: Send + Sync {
	/// Returns the full collection, newest first.
	async fn list(&self) -> Vec<Post>;

	/// Returns the post with the given id.
	async fn get(&self, id: &str) -> Option<Post> {
		self.list().await.into_iter().find(|post| post.id == id)
	}

	/// Creates a post at the front of the collection.
	async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

	/// Replaces the title and content of an existing post, returning `None`
	/// if no post has the given id.
	async fn update(&self, id: &str, post: NewPost) -> Result<Option<Post>, StoreError>;

	/// Removes a post, returning whether it existed.
	async fn remove(&self, id: &str) -> Result<bool, StoreError>;
}

/// Generates an id that is not used by any post in `posts`.
fn unique_id(posts: &[Post]) -> String {
	loop {
		let id = Uuid::new_v4().simple().to_string();

		if !posts.iter().any(|post| post.id == id) {
			return id;
		}
	}
}

/// Prepends a new post to `posts`, returning a copy of it.
fn prepend(posts: &mut Vec<Post>, input: NewPost) -> Post {
	let now = Utc::now();
	let post = Post {
		id: unique_id(posts),
		title: input.title,
		content: input.content,
		created_at: now,
		updated_at: now,
	};

	posts.insert(0, post.clone());
	post
}

/// Applies an edit in place, keeping the post's id, creation time and position.
fn edit(posts: &mut [Post], id: &str, input: NewPost) -> Option<Post> {
	let post = posts.iter_mut().find(|post| post.id == id)?;

	post.title = input.title;
	post.content = input.content;
	post.updated_at = Utc::now().max(post.created_at);

	Some(post.clone())
}

/// Removes the post with the given id, returning whether it was present.
fn retain_except(posts: &mut Vec<Post>, id: &str) -> bool {
	let before = posts.len();
	posts.retain(|post| post.id != id);

	posts.len() != before
}
