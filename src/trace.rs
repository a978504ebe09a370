use axum::{body::Body, http::Request};
use tower_http::request_id::RequestId;
use tracing::{level_filters::LevelFilter, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber, logging to stdout at `level`.
pub fn init_tracing_subscriber(level: LevelFilter) {
	tracing_subscriber::registry()
		.with(level)
		.with(tracing_subscriber::fmt::layer().with_ansi(true))
		.init();
}

/// Opens a span for a request, tagged with its request id when one was set.
pub fn make_span(request: &Request<Body>) -> Span {
	let request_id = request
		.extensions()
		.get::<RequestId>()
		.and_then(|id| id.header_value().to_str().ok())
		.unwrap_or("-");

	tracing::info_span!(
		"request",
		method = %request.method(),
		uri = %request.uri(),
		request_id,
	)
}
