use tokio::sync::RwLock;

use super::{edit, prepend, retain_except, NewPost, PostStore, StoreError};
use crate::model::Post;

/// An in-memory store. Data is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
	posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[axum::async_trait]
impl PostStore for MemoryStore {
	async fn list(&self) -> Vec<Post> {
		self.posts.read().await.clone()
	}

	async fn get(&self, id: &str) -> Option<Post> {
		self.posts.read().await.iter().find(|post| post.id == id).cloned()
	}

	async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
		Ok(prepend(&mut *self.posts.write().await, post))
	}

	async fn update(&self, id: &str, post: NewPost) -> Result<Option<Post>, StoreError> {
		Ok(edit(&mut self.posts.write().await, id, post))
	}

	async fn remove(&self, id: &str) -> Result<bool, StoreError> {
		Ok(retain_except(&mut *self.posts.write().await, id))
	}
}
