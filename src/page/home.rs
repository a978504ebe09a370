//! The home page: a card for every post, newest first.

use maud::{html, Markup, PreEscaped};
use serde::{Deserialize, Serialize};

use super::{empty_state, format_date, ApiRequest, Controller, Effect, Fallback, Reply};
use crate::{markdown, model::Post};

/// Number of characters shown in a card's content preview.
pub const PREVIEW_LENGTH: usize = 150;

const TARGET: &str = "posts-list";
const RETRY: &str = r#"{"type":"retry"}"#;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
	Load,
	Retry,
	Response(Reply),
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Home {
	#[serde(default)]
	loading: bool,
}

fn card(post: &Post) -> Markup {
	html! {
		a.post-card href={ "/post/" (post.id) } {
			h3 { (post.title) }
			div.post-preview { (PreEscaped(markdown::preview(&post.content, PREVIEW_LENGTH))) }
			div.post-meta {
				span.post-date { (format_date(&post.updated_at)) }
				span { (markdown::read_time(&post.content)) " min read" }
			}
		}
	}
}

fn render_posts(posts: &[Post]) -> Markup {
	if posts.is_empty() {
		return empty_state(
			"No posts yet",
			"Be the first to share your thoughts!",
			html! { a.btn-primary href="/write" { "Write First Post" } },
		);
	}

	html! {
		@for post in posts {
			(card(post))
		}
	}
}

impl Controller for Home {
	type Event = Event;

	fn handle(&mut self, event: Event) -> Vec<Effect> {
		match event {
			Event::Load | Event::Retry => {
				self.loading = true;

				vec![
					Effect::Render {
						target: TARGET,
						html: html! { div.loading { "Loading posts..." } }.into_string(),
					},
					Effect::Fetch {
						request: ApiRequest::get("/api/posts"),
					},
				]
			}
			Event::Response(reply) => {
				if !std::mem::take(&mut self.loading) {
					return Vec::new();
				}

				let html = match reply.parse::<Vec<Post>>() {
					Some(posts) => render_posts(&posts),
					None => {
						tracing::debug!(status = reply.status, "failed to load posts");

						empty_state(
							"Unable to load posts",
							"Something went wrong while loading the posts.",
							html! { button.btn-primary data-event=(RETRY) { "Try again" } },
						)
					}
				};

				vec![Effect::Render {
					target: TARGET,
					html: html.into_string(),
				}]
			}
		}
	}

	/// Any undelivered request shows the same panel as a failed load.
	fn fallback() -> Fallback {
		let failed = Self { loading: true }.handle(Event::Response(Reply::network_error()));

		Fallback::default()
			.on("load", failed.clone())
			.on("retry", failed.clone())
			.on("response", failed)
	}
}
