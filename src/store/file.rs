use std::{
	collections::HashSet,
	io,
	path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{edit, prepend, retain_except, NewPost, PostStore, StoreError};
use crate::model::Post;

/// A store backed by a single JSON file holding an array of posts.
///
/// Mutations within this process are serialized, but the file itself is not
/// locked: another process writing the same file may overwrite our changes.
pub struct JsonFileStore {
	path: PathBuf,
	write: Mutex<()>,
}

impl JsonFileStore {
	/// Opens the store at `path`, creating the file as an empty array if it
	/// does not exist yet.
	pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		if !tokio::fs::try_exists(&path).await? {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				tokio::fs::create_dir_all(parent).await?;
			}

			tokio::fs::write(&path, "[]").await?;
			tracing::info!(path = %path.display(), "created empty posts file");
		}

		Ok(Self {
			path,
			write: Mutex::new(()),
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads the file for a mutation. A missing file is an empty collection.
	async fn load(&self) -> Result<Contents, StoreError> {
		match tokio::fs::read(&self.path).await {
			Ok(bytes) => decode(&bytes).map_err(StoreError::Corrupt),
			Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Contents::default()),
			Err(error) => Err(error.into()),
		}
	}

	async fn read(&self) -> Vec<Post> {
		match self.load().await {
			Ok(contents) => contents.posts,
			Err(error) => {
				tracing::warn!(path = %self.path.display(), %error, "could not read posts file");
				Vec::new()
			}
		}
	}

	async fn write(&self, contents: &Contents) -> Result<(), StoreError> {
		let entries = contents
			.posts
			.iter()
			.map(Entry::Post)
			.chain(contents.skipped.iter().map(Entry::Raw))
			.collect::<Vec<_>>();

		let json = serde_json::to_vec_pretty(&entries)?;
		tokio::fs::write(&self.path, json).await?;

		Ok(())
	}
}

/// The decoded posts file.
#[derive(Debug, Default)]
struct Contents {
	posts: Vec<Post>,
	/// Entries that could not be loaded. They are written back untouched,
	/// after the posts.
	skipped: Vec<Value>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Entry<'a> {
	Post(&'a Post),
	Raw(&'a Value),
}

/// Decodes the posts file. Entries that are not valid posts, or that reuse
/// the id of an earlier post, are set aside.
fn decode(bytes: &[u8]) -> Result<Contents, serde_json::Error> {
	let entries = serde_json::from_slice::<Vec<Value>>(bytes)?;

	let mut contents = Contents::default();
	let mut ids = HashSet::new();

	for (index, entry) in entries.into_iter().enumerate() {
		match serde_json::from_value::<Post>(entry.clone()) {
			Ok(post) if !post.is_consistent() => {
				tracing::warn!(index, id = %post.id, "skipping post that violates invariants");
			}
			Ok(post) if ids.contains(&post.id) => {
				tracing::warn!(index, id = %post.id, "skipping post with a duplicate id");
			}
			Ok(post) => {
				ids.insert(post.id.clone());
				contents.posts.push(post);
				continue;
			}
			Err(error) => {
				tracing::warn!(index, %error, "skipping malformed post");
			}
		}

		contents.skipped.push(entry);
	}

	Ok(contents)
}

fn has_id(entry: &Value, id: &str) -> bool {
	entry.get("id").and_then(Value::as_str) == Some(id)
}

#[axum::async_trait]
impl PostStore for JsonFileStore {
	async fn list(&self) -> Vec<Post> {
		self.read().await
	}

	async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
		let _guard = self.write.lock().await;

		let mut contents = self.load().await?;
		let post = prepend(&mut contents.posts, post);
		self.write(&contents).await?;

		tracing::debug!(id = %post.id, "inserted post");
		Ok(post)
	}

	async fn update(&self, id: &str, post: NewPost) -> Result<Option<Post>, StoreError> {
		let _guard = self.write.lock().await;

		let mut contents = self.load().await?;
		let Some(post) = edit(&mut contents.posts, id, post) else {
			return Ok(None);
		};

		self.write(&contents).await?;

		tracing::debug!(id, "updated post");
		Ok(Some(post))
	}

	/// Removes the post along with any skipped entries stored under its id,
	/// so a hidden duplicate cannot take its place.
	async fn remove(&self, id: &str) -> Result<bool, StoreError> {
		let _guard = self.write.lock().await;

		let mut contents = self.load().await?;
		if !retain_except(&mut contents.posts, id) {
			return Ok(false);
		}

		contents.skipped.retain(|entry| !has_id(entry, id));
		self.write(&contents).await?;

		tracing::debug!(id, "removed post");
		Ok(true)
	}
}
