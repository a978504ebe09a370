use axum::{
	http::header,
	response::{Html, IntoResponse},
};
use macros::route;

use crate::{
	extract::{Json, Path},
	openapi::tag,
	page::{document, home::Home, view::View, write::Write, Controller},
};

use super::{
	model::{self, Page},
	Error, RouteError,
};

/// Runs one event through a controller of type `C`.
fn run<C: Controller>(input: model::EventInput) -> Result<model::EventOutput, Error> {
	let mut controller = match input.state {
		Some(state) if !state.is_null() => {
			serde_json::from_value::<C>(state).map_err(Error::InvalidState)?
		}
		_ => C::default(),
	};

	let event = serde_json::from_value::<C::Event>(input.event).map_err(Error::InvalidEvent)?;
	let effects = controller.handle(event);

	Ok(model::EventOutput {
		state: serde_json::to_value(&controller).map_err(Error::Encode)?,
		effects,
	})
}

/// Dispatch page event
/// Runs an event through the controller of a page and returns its new state and the effects for the browser to apply.
#[route(tag = tag::PAGE, response(status = 400, description = "The state or event does not fit the page."))]
pub async fn dispatch(
	Path(input): Path<model::PageInput>,
	Json(body): Json<model::EventInput>,
) -> Result<Json<model::EventOutput>, RouteError> {
	let output = match input.page {
		Page::Home => run::<Home>(body),
		Page::View => run::<View>(body),
		Page::Write => run::<Write>(body),
	}?;

	Ok(Json(output))
}

pub async fn home() -> Result<Html<String>, RouteError> {
	let document = document::home().map_err(Error::Encode)?;

	Ok(Html(document.into_string()))
}

pub async fn write() -> Result<Html<String>, RouteError> {
	let document = document::write().map_err(Error::Encode)?;

	Ok(Html(document.into_string()))
}

pub async fn view() -> Result<Html<String>, RouteError> {
	let document = document::view().map_err(Error::Encode)?;

	Ok(Html(document.into_string()))
}

pub async fn script() -> impl IntoResponse {
	(
		[(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
		include_str!("../../../public/app.js"),
	)
}

pub async fn stylesheet() -> impl IntoResponse {
	(
		[(header::CONTENT_TYPE, "text/css; charset=utf-8")],
		include_str!("../../../public/style.css"),
	)
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_pages_are_served() {
		let app = app();

		for path in ["/", "/write", "/post/abc"] {
			let response = app.get(path).await;

			assert_eq!(response.status_code(), 200);
			assert!(response.text().contains("/static/app.js"));
			assert!(response.text().contains("data-fallback"));
		}

		let response = app.get("/static/app.js").await;
		assert_eq!(response.status_code(), 200);
		assert!(response
			.header("content-type")
			.to_str()
			.unwrap()
			.starts_with("text/javascript"));
	}

	#[tokio::test]
	async fn test_home_flow() {
		let app = app();

		app.post("/api/posts")
			.json(&json!({ "title": "Hello", "content": "World" }))
			.await;
		let posts = app.get("/api/posts").await.json::<Value>();

		let output = app
			.post("/api/pages/home")
			.json(&json!({ "event": { "type": "load" } }))
			.await
			.json::<Value>();

		assert_eq!(output["effects"][1]["type"], "fetch");
		assert_eq!(output["effects"][1]["request"]["path"], "/api/posts");

		let output = app
			.post("/api/pages/home")
			.json(&json!({
				"state": output["state"],
				"event": { "type": "response", "status": 200, "body": posts },
			}))
			.await
			.json::<Value>();

		assert_eq!(output["effects"][0]["type"], "render");
		assert!(output["effects"][0]["html"]
			.as_str()
			.unwrap()
			.contains("<h3>Hello</h3>"));
	}

	#[tokio::test]
	async fn test_view_delete_flow() {
		let app = app();

		let output = app
			.post("/api/pages/view")
			.json(&json!({ "event": { "type": "load", "path": "/post/abc" } }))
			.await
			.json::<Value>();

		assert_eq!(output["effects"][0]["request"]["path"], "/api/posts/abc");

		let output = app
			.post("/api/pages/view")
			.json(&json!({
				"state": output["state"],
				"event": { "type": "response", "status": 404, "body": { "error": "Post not found" } },
			}))
			.await
			.json::<Value>();

		assert!(output["effects"][0]["html"]
			.as_str()
			.unwrap()
			.contains("Post not found"));

		let output = app
			.post("/api/pages/view")
			.json(&json!({ "state": output["state"], "event": { "type": "delete" } }))
			.await
			.json::<Value>();

		assert_eq!(output["effects"][0]["type"], "confirm");

		let output = app
			.post("/api/pages/view")
			.json(&json!({
				"state": output["state"],
				"event": { "type": "confirmed", "accepted": true },
			}))
			.await
			.json::<Value>();

		assert_eq!(output["effects"][0]["request"]["method"], "DELETE");
		assert_eq!(output["effects"][0]["request"]["path"], "/api/posts/abc");
	}

	#[tokio::test]
	async fn test_write_tick() {
		let app = app();

		let output = app
			.post("/api/pages/write")
			.json(&json!({
				"state": { "title": "Draft", "content": "Body" },
				"event": { "type": "tick", "now": "2024-03-05T14:05:00Z" },
			}))
			.await
			.json::<Value>();

		let effect = &output["effects"][0];
		assert_eq!(effect["type"], "save_draft");
		assert_eq!(effect["key"], "blog_draft");
		assert_eq!(effect["draft"]["title"], "Draft");
	}

	#[tokio::test]
	async fn test_bad_requests() {
		let app = app();

		let response = app
			.post("/api/pages/home")
			.json(&json!({ "event": { "type": "explode" } }))
			.await;
		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["error"], "Invalid page event");

		let response = app
			.post("/api/pages/write")
			.json(&json!({ "state": { "title": 5 }, "event": { "type": "load" } }))
			.await;
		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["error"], "Invalid page state");

		let response = app
			.post("/api/pages/nowhere")
			.json(&json!({ "event": { "type": "load" } }))
			.await;
		assert_eq!(response.status_code(), 404);
	}
}
