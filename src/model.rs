use chrono::{DateTime, Utc};
use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A single blog post.
///
/// This is the record stored in the posts file and returned to the client.
/// Fields marked `#[model(readonly)]` are assigned by the store and are not
/// part of the generated [`PostInput`].
#[model]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	/// The unique identifier of the post.
	#[model(readonly)]
	pub id: String,
	/// The title of the post, trimmed of surrounding whitespace.
	#[validate(custom(function = "crate::model::not_blank"))]
	#[serde(default)]
	pub title: String,
	/// The content of the post in markdown-lite format.
	#[validate(custom(function = "crate::model::not_blank"))]
	#[serde(default)]
	pub content: String,
	/// The creation time of the post.
	#[model(readonly)]
	pub created_at: DateTime<Utc>,
	/// The time of the most recent modification.
	#[model(readonly)]
	pub updated_at: DateTime<Utc>,
}

impl Post {
	/// Whether the record satisfies every invariant a stored post must hold.
	pub fn is_consistent(&self) -> bool {
		!self.id.is_empty() && self.validate().is_ok() && self.updated_at >= self.created_at
	}
}

/// Rejects strings that are empty or only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::new("blank"));
	}

	Ok(())
}
