use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

pub use crate::page::Effect;

/// A page with a controller.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Page {
	Home,
	View,
	Write,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PageInput {
	pub page: Page,
}

/// An event for a page controller, along with the state returned by the
/// previous call.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct EventInput {
	/// The controller state. A missing state starts a fresh controller.
	#[serde(default)]
	pub state: Option<Value>,
	pub event: Value,
}

/// The updated controller state and the effects for the browser to apply.
#[derive(Debug, Serialize, JsonSchema)]
pub struct EventOutput {
	pub state: Value,
	pub effects: Vec<Effect>,
}
