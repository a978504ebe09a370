use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Path},
	openapi::tag,
	store::{NewPost, Store},
	WriteOptions,
};

use super::{model, Error, RouteError};

/// Get all posts
/// Returns every post, newest first.
#[route(tag = tag::POST)]
pub async fn get_posts(State(store): State<Store>) -> Json<Vec<model::Post>> {
	Json(store.list().await)
}

/// Get single post
/// Returns a single post by its unique id.
#[route(tag = tag::POST, response(status = 404, description = "No post has this id."))]
pub async fn get_post(
	State(store): State<Store>,
	Path(input): Path<model::IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = store.get(&input.id).await;

	Ok(Json(post.ok_or(Error::UnknownPost(input.id))?))
}

/// Create post
/// Creates a new post at the front of the collection. Both the title and the content must be non-blank.
#[route(tag = tag::POST, response(status = 400, description = "The title or content is blank."))]
pub async fn create_post(
	State(store): State<Store>,
	State(options): State<WriteOptions>,
	Json(input): Json<model::PostInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = store
		.insert(NewPost::new(&input.title, &input.content, options.sanitize))
		.await?;

	tracing::info!(id = %post.id, "created post");

	Ok(Json(post))
}

/// Update post
/// Replaces the title and content of an existing post by its unique id.
#[route(tag = tag::POST, response(status = 404, description = "No post has this id."))]
pub async fn update_post(
	State(store): State<Store>,
	State(options): State<WriteOptions>,
	Path(id): Path<model::IdInput>,
	Json(input): Json<model::PostInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = store
		.update(
			&id.id,
			NewPost::new(&input.title, &input.content, options.sanitize),
		)
		.await?;

	Ok(Json(post.ok_or(Error::UnknownPost(id.id))?))
}

/// Delete post
/// Deletes an existing post by its unique id.
#[route(tag = tag::POST, response(status = 404, description = "No post has this id."))]
pub async fn delete_post(
	State(store): State<Store>,
	Path(input): Path<model::IdInput>,
) -> Result<Json<model::Deleted>, RouteError> {
	if !store.remove(&input.id).await? {
		return Err(Error::UnknownPost(input.id).into());
	}

	tracing::info!(id = %input.id, "deleted post");

	Ok(Json(model::Deleted::new()))
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_create_then_get() {
		let app = app();

		let response = app
			.post("/api/posts")
			.json(&json!({ "title": "Hello", "content": "World" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let created = response.json::<Value>();
		let id = created["id"].as_str().unwrap();

		assert!(!id.is_empty());
		assert_eq!(created["createdAt"], created["updatedAt"]);

		let response = app.get(&format!("/api/posts/{id}")).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), created);
	}

	#[tokio::test]
	async fn test_title_is_trimmed() {
		let app = app();

		let response = app
			.post("/api/posts")
			.json(&json!({ "title": "  Spaced out  ", "content": "body" }))
			.await;

		assert_eq!(response.json::<Value>()["title"], "Spaced out");
	}

	#[tokio::test]
	async fn test_list_is_newest_first() {
		let app = app();

		for title in ["first", "second", "third"] {
			app.post("/api/posts")
				.json(&json!({ "title": title, "content": "body" }))
				.await;
		}

		let posts = app.get("/api/posts").await.json::<Vec<Value>>();
		let titles = posts
			.iter()
			.map(|post| post["title"].as_str().unwrap())
			.collect::<Vec<_>>();

		assert_eq!(titles, ["third", "second", "first"]);
	}

	#[tokio::test]
	async fn test_empty_title_is_rejected() {
		let app = app();

		let response = app
			.post("/api/posts")
			.json(&json!({ "title": "   ", "content": "World" }))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["error"], "Title is required");

		let posts = app.get("/api/posts").await.json::<Vec<Value>>();
		assert!(posts.is_empty());
	}

	#[tokio::test]
	async fn test_missing_fields_are_rejected() {
		let app = app();

		let response = app.post("/api/posts").json(&json!({})).await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(
			response.json::<Value>()["error"],
			"Title and content are required"
		);
	}

	#[tokio::test]
	async fn test_malformed_body_is_rejected() {
		let app = app();

		let response = app
			.post("/api/posts")
			.content_type("application/json")
			.bytes("{ nope".into())
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>()["error"], "Invalid request body");
	}

	#[tokio::test]
	async fn test_unknown_post() {
		let app = app();

		let response = app.get("/api/posts/missing").await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>()["error"], "Post not found");
	}

	#[tokio::test]
	async fn test_delete_lifecycle() {
		let app = app();

		let created = app
			.post("/api/posts")
			.json(&json!({ "title": "Hello", "content": "World" }))
			.await
			.json::<Value>();
		let kept = app
			.post("/api/posts")
			.json(&json!({ "title": "Keep", "content": "me" }))
			.await
			.json::<Value>();
		let path = format!("/api/posts/{}", created["id"].as_str().unwrap());

		let response = app.delete(&path).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(
			response.json::<Value>()["message"],
			"Post deleted successfully"
		);

		assert_eq!(app.get(&path).await.status_code(), 404);
		assert_eq!(app.delete(&path).await.status_code(), 404);

		let posts = app.get("/api/posts").await.json::<Vec<Value>>();
		assert_eq!(posts, [kept]);
	}

	#[tokio::test]
	async fn test_update() {
		let app = app();

		let created = app
			.post("/api/posts")
			.json(&json!({ "title": "Hello", "content": "World" }))
			.await
			.json::<Value>();
		let path = format!("/api/posts/{}", created["id"].as_str().unwrap());

		let response = app
			.put(&path)
			.json(&json!({ "title": "Goodbye", "content": "Moon" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let updated = response.json::<Value>();
		assert_eq!(updated["id"], created["id"]);
		assert_eq!(updated["title"], "Goodbye");
		assert_eq!(updated["content"], "Moon");
		assert_eq!(updated["createdAt"], created["createdAt"]);

		let response = app
			.put(&path)
			.json(&json!({ "title": "", "content": "Moon" }))
			.await;
		assert_eq!(response.status_code(), 400);

		let response = app
			.put("/api/posts/missing")
			.json(&json!({ "title": "a", "content": "b" }))
			.await;
		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_sanitize_on_write() {
		let app = app_with(
			std::sync::Arc::new(MemoryStore::new()),
			WriteOptions { sanitize: true },
		);

		let post = app
			.post("/api/posts")
			.json(&json!({ "title": "<script>", "content": "a & b" }))
			.await
			.json::<Value>();

		assert_eq!(post["title"], "&lt;script&gt;");
		assert_eq!(post["content"], "a &amp; b");
	}

	#[tokio::test]
	async fn test_storage_failure_is_generic() {
		let app = app_with(std::sync::Arc::new(BrokenStore), WriteOptions::default());
		let body = json!({ "title": "Hello", "content": "World" });

		let responses = [
			app.post("/api/posts").json(&body).await,
			app.put("/api/posts/abc").json(&body).await,
			app.delete("/api/posts/abc").await,
		];

		for response in responses {
			assert_eq!(response.status_code(), 500);
			assert_eq!(
				response.json::<Value>(),
				json!({ "error": "Internal server error", "errors": [] })
			);
			assert!(!response.text().contains("read-only"));
		}
	}
}
