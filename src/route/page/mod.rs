use std::borrow::Cow;

use aide::axum::{routing::post_with, ApiRouter};
use axum::{http::StatusCode, routing::get, Router};

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid page state: {0}")]
	InvalidState(serde_json::Error),
	#[error("invalid page event: {0}")]
	InvalidEvent(serde_json::Error),
	#[error("failed to encode page state: {0}")]
	Encode(serde_json::Error),
}

pub type RouteError = error::RouteError<Error>;

/// The controller API, documented alongside the rest of the API.
pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route("/:page", post_with(dispatch, dispatch_docs))
}

/// The HTML documents and their assets.
pub fn pages() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(home))
		.route("/write", get(write))
		.route("/post/:id", get(view))
		.route("/static/app.js", get(script))
		.route("/static/style.css", get(stylesheet))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::InvalidState(..) | Self::InvalidEvent(..) => StatusCode::BAD_REQUEST,
			Self::Encode(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn summary(&self) -> Cow<'static, str> {
		match self {
			Self::InvalidState(..) => "Invalid page state".into(),
			Self::InvalidEvent(..) => "Invalid page event".into(),
			Self::Encode(..) => "Internal server error".into(),
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		match self {
			Self::InvalidState(error) | Self::InvalidEvent(error) => {
				error::Message::new(error.to_string()).into_vec()
			}
			Self::Encode(error) => {
				tracing::error!(%error, "failed to encode page state");
				Vec::new()
			}
		}
	}
}
