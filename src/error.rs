use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	extract::rejection::{JsonRejection, PathRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::store::StoreError;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single message describing part of an error.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// A machine-readable description of the problem.
	pub content: Cow<'a, str>,
	/// The input field the message refers to, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	/// Additional context for the message.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

impl<'a> Message<'a> {
	pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	pub fn field(mut self, field: impl Into<Cow<'a, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The body of every error response.
///
/// `error` is a human-readable summary that clients may show as-is.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorBody {
	pub error: Cow<'static, str>,
	pub errors: Vec<Message<'static>>,
}

impl ErrorBody {
	fn respond(self, status: StatusCode) -> Response {
		(status, axum::Json(self)).into_response()
	}
}

/// The client-facing shape of a route-specific error.
///
/// Everything returned here is sent to the client, so it must not contain
/// sensitive information.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	/// The summary shown to the user.
	fn summary(&self) -> Cow<'static, str>;

	fn into_errors(self) -> Vec<Message<'static>>;
}

/// Errors shared by every route.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] JsonRejection),
	#[error("path error: {0}")]
	Path(#[from] PathRejection),
	#[error("store error: {0}")]
	Store(#[from] StoreError),
}

/// Builds a summary such as "Title and content are required" from the
/// names of the offending fields, in reverse alphabetical order.
fn required_summary(mut fields: Vec<String>) -> String {
	fields.sort_unstable_by(|a, b| b.cmp(a));

	let verb = if fields.len() == 1 { "is" } else { "are" };
	let mut summary = fields.join(" and ");

	if let Some(first) = summary.get(..1) {
		let upper = first.to_uppercase();
		summary.replace_range(..1, &upper);
	}

	format!("{summary} {verb} required")
}

impl AppError {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) => StatusCode::BAD_REQUEST,
			Self::Path(..) => StatusCode::NOT_FOUND,
			Self::Store(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn into_body(self) -> ErrorBody {
		match self {
			Self::Validation(errors) => {
				let errors = errors.field_errors();
				let fields = errors.keys().map(ToString::to_string).collect();

				ErrorBody {
					error: required_summary(fields).into(),
					errors: errors
						.into_iter()
						.flat_map(|(field, errors)| {
							errors.iter().map(move |error| {
								Message::new(error.code.clone()).field(field.to_string())
							})
						})
						.collect(),
				}
			}
			Self::Json(rejection) => ErrorBody {
				error: "Invalid request body".into(),
				errors: Message::new(rejection.body_text()).into_vec(),
			},
			Self::Path(rejection) => ErrorBody {
				error: "Not found".into(),
				errors: Message::new(rejection.body_text()).into_vec(),
			},
			Self::Store(error) => {
				tracing::error!(%error, "storage failure");

				ErrorBody {
					error: "Internal server error".into(),
					errors: Vec::new(),
				}
			}
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let status = self.status();
		self.into_body().respond(status)
	}
}

/// The error type returned by route handlers: either a route-specific error
/// `T` or one of the shared [`AppError`]s.
#[derive(Debug)]
pub enum RouteError<T> {
	Route(T),
	App(AppError),
}

impl<T: ErrorShape> From<T> for RouteError<T> {
	fn from(error: T) -> Self {
		Self::Route(error)
	}
}

impl<T> From<AppError> for RouteError<T> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<T> From<StoreError> for RouteError<T> {
	fn from(error: StoreError) -> Self {
		Self::App(error.into())
	}
}

impl<T: ErrorShape> IntoResponse for RouteError<T> {
	fn into_response(self) -> Response {
		match self {
			Self::Route(error) => {
				let status = error.status();

				ErrorBody {
					error: error.summary(),
					errors: error.into_errors(),
				}
				.respond(status)
			}
			Self::App(error) => error.into_response(),
		}
	}
}

impl<T> OperationOutput for RouteError<T> {
	type Inner = ErrorBody;
}
