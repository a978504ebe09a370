pub use crate::{
	model::{Post, PostInput},
	route::model::IdInput,
};

use schemars::JsonSchema;
use serde::Serialize;

/// Confirmation that a post was deleted.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Deleted {
	pub message: &'static str,
}

impl Deleted {
	pub const fn new() -> Self {
		Self {
			message: "Post deleted successfully",
		}
	}
}
