//! The composer: live preview, draft autosave and publishing.

use chrono::{DateTime, Utc};
use maud::{html, PreEscaped};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiRequest, Controller, Draft, Effect, Fallback, Reply, DRAFT_KEY};
use crate::markdown;

/// Soft limit on the title length, shown by the counter.
pub const TITLE_LIMIT: usize = 100;
/// Above this many characters the counter turns into a warning.
pub const TITLE_WARNING: usize = 90;
pub const AUTOSAVE_INTERVAL_MS: u64 = 30_000;

const PREVIEW: &str = "preview-content";
const COUNTER: &str = "title-char-count";
const PUBLISH: &str = "save-btn";
const PUBLISH_LABEL: &str = "Publish Post";

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
	Load,
	TitleInput { value: String },
	ContentInput { value: String },
	DraftLoaded { draft: Option<Draft> },
	Confirmed { accepted: bool },
	Tick { now: DateTime<Utc> },
	Publish,
	Response(Reply),
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Write {
	#[serde(default)]
	title: String,
	#[serde(default)]
	content: String,
	/// A publish request is in flight.
	#[serde(default)]
	publishing: bool,
	/// A stored draft waiting for the user to accept or decline it.
	#[serde(default)]
	offered: Option<Draft>,
}

impl Write {
	fn counter(&self) -> Effect {
		let count = self.title.chars().count();
		let html = if count > TITLE_WARNING {
			html! { span.warn { (count) "/" (TITLE_LIMIT) } }
		} else {
			html! { span { (count) "/" (TITLE_LIMIT) } }
		};

		Effect::Render {
			target: COUNTER,
			html: html.into_string(),
		}
	}

	fn preview(&self) -> Effect {
		let title = match self.title.trim() {
			"" => "Untitled",
			title => title,
		};

		let html = html! {
			@if self.content.is_empty() {
				div.empty { "Start writing to see preview..." }
			} @else {
				h1 { (title) }
				div.post-content { (PreEscaped(markdown::render(&self.content))) }
			}
		};

		Effect::Render {
			target: PREVIEW,
			html: html.into_string(),
		}
	}

	fn publish(&mut self) -> Vec<Effect> {
		if self.publishing {
			return Vec::new();
		}

		let title = self.title.trim();
		let content = self.content.trim();

		if title.is_empty() || content.is_empty() {
			return vec![Effect::Alert {
				message: "Please add both title and content before publishing.".to_owned(),
			}];
		}

		let request = ApiRequest::post("/api/posts", json!({ "title": title, "content": content }));
		self.publishing = true;

		vec![
			Effect::SetBusy {
				target: PUBLISH,
				busy: true,
				label: "Publishing...",
			},
			Effect::Fetch { request },
		]
	}

	fn published(&mut self, reply: Reply) -> Vec<Effect> {
		self.publishing = false;

		let mut effects = vec![Effect::SetBusy {
			target: PUBLISH,
			busy: false,
			label: PUBLISH_LABEL,
		}];

		if reply.is_success() {
			effects.extend([
				Effect::ClearDraft { key: DRAFT_KEY },
				Effect::Alert {
					message: "Post published successfully!".to_owned(),
				},
				Effect::Navigate { path: "/".to_owned() },
			]);
		} else {
			effects.push(Effect::Alert {
				message: format!("Failed to publish post: {}", reply.error_message()),
			});
		}

		effects
	}
}

impl Controller for Write {
	type Event = Event;

	fn handle(&mut self, event: Event) -> Vec<Effect> {
		match event {
			Event::Load => vec![
				self.counter(),
				self.preview(),
				Effect::LoadDraft { key: DRAFT_KEY },
				Effect::StartTimer {
					interval_ms: AUTOSAVE_INTERVAL_MS,
				},
			],
			Event::TitleInput { value } => {
				self.title = value;
				vec![self.counter(), self.preview()]
			}
			Event::ContentInput { value } => {
				self.content = value;
				vec![self.preview()]
			}
			Event::DraftLoaded { draft: Some(draft) } => {
				let message = format!(
					"Found an unsaved draft from {}. Load it?",
					draft.timestamp.format("%B %-d, %Y %H:%M UTC")
				);
				self.offered = Some(draft);

				vec![Effect::Confirm { message }]
			}
			Event::DraftLoaded { draft: None } => Vec::new(),
			Event::Confirmed { accepted } => match self.offered.take() {
				Some(draft) if accepted => {
					self.title = draft.title;
					self.content = draft.content;

					vec![
						Effect::SetInputs {
							title: self.title.clone(),
							content: self.content.clone(),
						},
						self.counter(),
						self.preview(),
					]
				}
				_ => Vec::new(),
			},
			Event::Tick { now } => vec![Effect::SaveDraft {
				key: DRAFT_KEY,
				draft: Draft {
					title: self.title.clone(),
					content: self.content.clone(),
					timestamp: now,
				},
			}],
			Event::Publish => self.publish(),
			Event::Response(reply) if self.publishing => self.published(reply),
			Event::Response(..) => Vec::new(),
		}
	}

	/// Drafts keep being saved locally, and an undelivered publish fails like
	/// a publish request that never completed.
	fn fallback() -> Fallback {
		let failed = Self {
			publishing: true,
			..Self::default()
		}
		.handle(Event::Response(Reply::network_error()));

		Fallback::default()
			.on(
				"load",
				vec![Effect::StartTimer {
					interval_ms: AUTOSAVE_INTERVAL_MS,
				}],
			)
			.on("publish", failed)
			.draft(DRAFT_KEY)
	}
}
