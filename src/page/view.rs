//! The single-post page, with delete and (placeholder) edit actions.

use maud::{html, Markup, PreEscaped};
use serde::{Deserialize, Serialize};

use super::{
	empty_state, format_date, format_time, ApiRequest, Controller, Effect, Fallback, Reply,
	SITE_NAME,
};
use crate::{markdown, model::Post};

const TARGET: &str = "post-content";

pub const DELETE_PROMPT: &str =
	"Are you sure you want to delete this post? This action cannot be undone.";
pub const EDIT_NOTICE: &str = "Edit functionality will be implemented in the next version!";

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
	/// The page was opened at `path`, e.g. `/post/abc`.
	Load { path: String },
	Response(Reply),
	Delete,
	Confirmed { accepted: bool },
	Edit,
}

/// What the controller is waiting for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Pending {
	#[default]
	Nothing,
	Post,
	Confirmation,
	Deletion,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct View {
	#[serde(default)]
	id: Option<String>,
	#[serde(default)]
	pending: Pending,
}

/// The post id is the last segment of the page path.
fn post_id(path: &str) -> Option<&str> {
	path.split('/').filter(|segment| !segment.is_empty()).last()
}

fn not_found() -> Effect {
	Effect::Render {
		target: TARGET,
		html: empty_state(
			"Post not found",
			"The post you're looking for doesn't exist or may have been deleted.",
			html! { a.btn-primary href="/" { "Back to Home" } },
		)
		.into_string(),
	}
}

fn article(post: &Post) -> Markup {
	html! {
		article.post-article {
			h1 { (post.title) }
			div.post-meta-large {
				"Published on " (format_date(&post.updated_at)) " at " (format_time(&post.updated_at))
			}
			div.post-content { (PreEscaped(markdown::render(&post.content))) }
		}
	}
}

impl View {
	fn load(&mut self, path: &str) -> Vec<Effect> {
		let Some(id) = post_id(path) else {
			return vec![not_found()];
		};

		self.id = Some(id.to_owned());
		self.pending = Pending::Post;

		vec![Effect::Fetch {
			request: ApiRequest::get(format!("/api/posts/{id}")),
		}]
	}

	fn loaded(&mut self, reply: Reply) -> Vec<Effect> {
		match reply.parse::<Post>() {
			Some(post) => vec![
				Effect::Render {
					target: TARGET,
					html: article(&post).into_string(),
				},
				Effect::SetDocumentTitle {
					title: format!("{} - {SITE_NAME}", post.title),
				},
			],
			None => vec![not_found()],
		}
	}

	fn deleted(reply: Reply) -> Vec<Effect> {
		if reply.is_success() {
			return vec![
				Effect::Alert {
					message: "Post deleted successfully!".to_owned(),
				},
				Effect::Navigate { path: "/".to_owned() },
			];
		}

		vec![Effect::Alert {
			message: format!("Failed to delete post: {}", reply.error_message()),
		}]
	}
}

impl Controller for View {
	type Event = Event;

	fn handle(&mut self, event: Event) -> Vec<Effect> {
		match (event, self.pending) {
			(Event::Load { path }, _) => self.load(&path),
			(Event::Response(reply), Pending::Post) => {
				self.pending = Pending::Nothing;
				self.loaded(reply)
			}
			(Event::Response(reply), Pending::Deletion) => {
				self.pending = Pending::Nothing;
				Self::deleted(reply)
			}
			(Event::Delete, Pending::Nothing) if self.id.is_some() => {
				self.pending = Pending::Confirmation;

				vec![Effect::Confirm {
					message: DELETE_PROMPT.to_owned(),
				}]
			}
			(Event::Confirmed { accepted }, Pending::Confirmation) => {
				self.pending = Pending::Nothing;

				match (&self.id, accepted) {
					(Some(id), true) => {
						self.pending = Pending::Deletion;

						vec![Effect::Fetch {
							request: ApiRequest::delete(format!("/api/posts/{id}")),
						}]
					}
					_ => Vec::new(),
				}
			}
			(Event::Edit, _) => vec![Effect::Alert {
				message: EDIT_NOTICE.to_owned(),
			}],
			_ => Vec::new(),
		}
	}

	/// An undelivered load reads as a missing post, an undelivered delete as a
	/// failed one.
	fn fallback() -> Fallback {
		let missing = Self {
			id: None,
			pending: Pending::Post,
		}
		.handle(Event::Response(Reply::network_error()));
		let failed = Self {
			id: None,
			pending: Pending::Deletion,
		}
		.handle(Event::Response(Reply::network_error()));

		Fallback::default()
			.on("load", missing)
			.on("delete", failed.clone())
			.on("confirmed", failed)
			.on("edit", Self::default().handle(Event::Edit))
	}
}

#[cfg(test)]
mod test {
	use chrono::{TimeZone, Utc};
	use serde_json::json;

	use super::*;

	fn reply(status: u16, body: serde_json::Value) -> Reply {
		Reply { status, body }
	}

	fn opened() -> View {
		let mut view = View::default();
		view.handle(Event::Load {
			path: "/post/abc".into(),
		});

		view
	}

	#[test]
	fn test_post_id() {
		assert_eq!(post_id("/post/abc"), Some("abc"));
		assert_eq!(post_id("/post/abc/"), Some("abc"));
		assert_eq!(post_id("/"), None);
	}

	#[test]
	fn test_load_fetches_post() {
		let effects = View::default().handle(Event::Load {
			path: "/post/abc".into(),
		});

		assert_eq!(
			effects,
			[Effect::Fetch {
				request: ApiRequest::get("/api/posts/abc")
			}]
		);
	}

	#[test]
	fn test_renders_post() {
		let mut view = opened();
		let time = Utc.with_ymd_and_hms(2024, 3, 5, 14, 5, 0).unwrap();
		let post = Post {
			id: "abc".into(),
			title: "Hello <world>".into(),
			content: "# Intro\n- one\n\ntext".into(),
			created_at: time,
			updated_at: time,
		};

		let effects = view.handle(Event::Response(reply(
			200,
			serde_json::to_value(&post).unwrap(),
		)));

		let Effect::Render { html, .. } = &effects[0] else {
			panic!("expected a render, got {effects:?}");
		};

		assert!(html.contains("<h1>Hello &lt;world&gt;</h1>"));
		assert!(html.contains("Published on March 5, 2024 at 14:05 UTC"));
		assert!(html.contains("<h1>Intro</h1><li>one</li><br><p>text</p>"));
		assert_eq!(
			effects[1],
			Effect::SetDocumentTitle {
				title: "Hello <world> - Mini Blog".into()
			}
		);
	}

	#[test]
	fn test_missing_post_renders_not_found() {
		let effects = opened().handle(Event::Response(reply(
			404,
			json!({ "error": "Post not found" }),
		)));

		let Effect::Render { html, .. } = &effects[0] else {
			panic!("expected a render, got {effects:?}");
		};

		assert!(html.contains("Post not found"));
		assert!(html.contains(r#"href="/""#));
	}

	#[test]
	fn test_delete_confirmed() {
		let mut view = opened();
		view.handle(Event::Response(reply(404, json!(null))));

		assert_eq!(
			view.handle(Event::Delete),
			[Effect::Confirm {
				message: DELETE_PROMPT.into()
			}]
		);
		assert_eq!(
			view.handle(Event::Confirmed { accepted: true }),
			[Effect::Fetch {
				request: ApiRequest::delete("/api/posts/abc")
			}]
		);

		let effects = view.handle(Event::Response(reply(
			200,
			json!({ "message": "Post deleted successfully" }),
		)));

		assert_eq!(effects[1], Effect::Navigate { path: "/".into() });
	}

	#[test]
	fn test_delete_declined() {
		let mut view = opened();
		view.handle(Event::Response(reply(404, json!(null))));
		view.handle(Event::Delete);

		assert!(view.handle(Event::Confirmed { accepted: false }).is_empty());
		assert!(view
			.handle(Event::Response(reply(200, json!(null))))
			.is_empty());
	}

	#[test]
	fn test_delete_failure_alerts() {
		let mut view = opened();
		view.handle(Event::Response(reply(404, json!(null))));
		view.handle(Event::Delete);
		view.handle(Event::Confirmed { accepted: true });

		let effects = view.handle(Event::Response(reply(
			404,
			json!({ "error": "Post not found" }),
		)));

		assert_eq!(
			effects,
			[Effect::Alert {
				message: "Failed to delete post: Post not found".into()
			}]
		);
	}

	#[test]
	fn test_edit_is_a_placeholder() {
		assert_eq!(
			opened().handle(Event::Edit),
			[Effect::Alert {
				message: EDIT_NOTICE.into()
			}]
		);
	}

	#[test]
	fn test_state_round_trips_through_json() {
		let mut view = opened();
		view.handle(Event::Response(reply(404, json!(null))));
		view.handle(Event::Delete);

		let mut restored: View =
			serde_json::from_value(serde_json::to_value(&view).unwrap()).unwrap();

		assert!(matches!(
			restored.handle(Event::Confirmed { accepted: true }).as_slice(),
			[Effect::Fetch { .. }]
		));
	}

	#[test]
	fn test_fallback() {
		let fallback = View::fallback();

		assert_eq!(fallback.effects["load"], [not_found()]);
		assert_eq!(
			fallback.effects["delete"],
			[Effect::Alert {
				message: "Failed to delete post: Network error".into()
			}]
		);
		assert_eq!(fallback.effects["delete"], fallback.effects["confirmed"]);
		assert_eq!(
			fallback.effects["edit"],
			[Effect::Alert {
				message: EDIT_NOTICE.into()
			}]
		);
	}
}
