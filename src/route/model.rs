use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

/// The id of a resource, taken from the request path.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	#[validate(length(min = 1))]
	pub id: String,
}
