#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod markdown;
mod model;
mod openapi;
mod page;
mod route;
mod sanitize;
mod store;
mod trace;


use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{extract::Request, Extension, Router, ServiceExt};
use tower::{Layer, ServiceBuilder};
use tower_http::{
	compression::CompressionLayer,
	normalize_path::NormalizePathLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use crate::{
	config::Config,
	store::{JsonFileStore, Store},
};

pub type AppState = State;

/// The shared application state.
///
/// Handlers pick the part they need with `State<Store>` or `State<WriteOptions>`.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub store: Store,
	pub options: WriteOptions,
}

/// Options applied to every post that is created or updated.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
	/// HTML-escape titles and contents before storing them.
	pub sanitize: bool,
}

/// Builds the application router: the REST API, its documentation and the pages.
pub fn app(state: State) -> Router {
	aide::gen::on_error(|error| {
		tracing::error!(%error, "failed to generate api documentation");
	});
	aide::gen::extract_schemas(true);

	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/api/posts", route::post::routes())
		.nest("/api/pages", route::page::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.merge(route::page::pages())
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http().make_span_with(trace::make_span))
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::from_env()?;

	trace::init_tracing_subscriber(config.log_level);

	let store = JsonFileStore::open(config.posts_file.clone()).await?;
	tracing::info!(path = %store.path().display(), "opened post store");

	let state = State {
		store: Arc::new(store),
		options: WriteOptions {
			sanitize: config.sanitize_on_write,
		},
	};

	let app = NormalizePathLayer::trim_trailing_slash().layer(app(state));
	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!(address = %listener.local_addr()?, "listening");

	axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

	Ok(())
}
