//! Page controllers.
//!
//! Each page of the site is driven by a controller: a small serializable
//! state plus an event type. Handling an event updates the state and returns
//! the [`Effect`]s the browser has to carry out, such as rendering a fragment
//! or sending an API request. The outcome of an effect that produces a value
//! (a fetch, a confirm prompt, reading the draft) comes back as another event.
//!
//! Controllers never touch the network, the DOM or the clock themselves.
//!
//! When the browser cannot deliver an event at all, it falls back to the
//! page's [`Fallback`], which is computed here and embedded in the document.

pub mod document;
pub mod home;
pub mod view;
pub mod write;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use maud::{html, Markup};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// The key the draft is stored under in client-local storage.
pub const DRAFT_KEY: &str = "blog_draft";

/// Suffix appended to the document title of every page.
pub const SITE_NAME: &str = "Mini Blog";

/// A page controller.
pub trait Controller: Default + Serialize + DeserializeOwned {
	type Event: DeserializeOwned;

	fn handle(&mut self, event: Self::Event) -> Vec<Effect>;

	/// What the browser does with an event it could not deliver.
	fn fallback() -> Fallback;
}

/// Local behaviour of a page while its controller is unreachable.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Fallback {
	/// Effects to apply in place of a reply, by event type. Events without
	/// an entry are dropped.
	pub effects: BTreeMap<&'static str, Vec<Effect>>,
	/// Where `tick` events store the current inputs as a draft.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub draft_key: Option<&'static str>,
}

impl Fallback {
	pub fn on(mut self, event: &'static str, effects: Vec<Effect>) -> Self {
		self.effects.insert(event, effects);
		self
	}

	pub fn draft(mut self, key: &'static str) -> Self {
		self.draft_key = Some(key);
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
	Delete,
}

/// An HTTP request against the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ApiRequest {
	pub method: Method,
	pub path: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<Value>,
}

impl ApiRequest {
	pub fn get(path: impl Into<String>) -> Self {
		Self {
			method: Method::Get,
			path: path.into(),
			body: None,
		}
	}

	pub fn post(path: impl Into<String>, body: Value) -> Self {
		Self {
			method: Method::Post,
			path: path.into(),
			body: Some(body),
		}
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self {
			method: Method::Delete,
			path: path.into(),
			body: None,
		}
	}
}

/// The outcome of an [`Effect::Fetch`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reply {
	/// The HTTP status, or `0` if the request never completed.
	pub status: u16,
	#[serde(default)]
	pub body: Value,
}

impl Reply {
	/// The reply to a request that never completed.
	pub fn network_error() -> Self {
		Self {
			status: 0,
			body: Value::Null,
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decodes a successful reply's body.
	pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
		if !self.is_success() {
			return None;
		}

		serde_json::from_value(self.body.clone()).ok()
	}

	/// The message to show the user for a failed request.
	pub fn error_message(&self) -> String {
		if self.status == 0 {
			return "Network error".to_owned();
		}

		match self.body.get("error").and_then(Value::as_str) {
			Some(error) => error.to_owned(),
			None => format!("Request failed with status {}", self.status),
		}
	}
}

/// A client-local snapshot of an unpublished post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Draft {
	pub title: String,
	pub content: String,
	pub timestamp: DateTime<Utc>,
}

/// An instruction for the browser.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
	/// Replace the inner HTML of the element with id `target`.
	Render { target: &'static str, html: String },
	/// Send a request, answering with a `response` event.
	Fetch { request: ApiRequest },
	/// Ask a yes/no question, answering with a `confirmed` event.
	Confirm { message: String },
	Alert { message: String },
	Navigate { path: String },
	SetDocumentTitle { title: String },
	/// Disable or re-enable a button and change its label.
	SetBusy {
		target: &'static str,
		busy: bool,
		label: &'static str,
	},
	/// Overwrite the values of the title and content inputs.
	SetInputs { title: String, content: String },
	/// Read the stored draft, answering with a `draft_loaded` event.
	LoadDraft { key: &'static str },
	SaveDraft { key: &'static str, draft: Draft },
	ClearDraft { key: &'static str },
	/// Send a `tick` event every `interval_ms` milliseconds.
	StartTimer { interval_ms: u64 },
}

/// Formats a timestamp as a calendar date, e.g. "March 5, 2024".
pub fn format_date(time: &DateTime<Utc>) -> String {
	time.format("%B %-d, %Y").to_string()
}

/// Formats the time of day of a timestamp, e.g. "14:05 UTC".
pub fn format_time(time: &DateTime<Utc>) -> String {
	time.format("%H:%M UTC").to_string()
}

/// An HTML panel shown in place of missing content.
fn empty_state(heading: &str, text: &str, action: Markup) -> Markup {
	html! {
		div.empty-state {
			h3 { (heading) }
			p { (text) }
			(action)
		}
	}
}

#[cfg(test)]
mod test {
	use chrono::TimeZone;
	use serde_json::json;

	use super::*;

	#[test]
	fn test_reply_error_message() {
		let reply = Reply {
			status: 404,
			body: json!({ "error": "Post not found" }),
		};
		assert_eq!(reply.error_message(), "Post not found");

		assert_eq!(Reply::network_error().error_message(), "Network error");

		let reply = Reply {
			status: 502,
			body: json!("bad gateway"),
		};
		assert_eq!(reply.error_message(), "Request failed with status 502");
	}

	#[test]
	fn test_reply_parse_requires_success() {
		let reply = Reply {
			status: 500,
			body: json!([]),
		};

		assert!(reply.parse::<Vec<Value>>().is_none());
	}

	#[test]
	fn test_effect_serialization() {
		let effect = Effect::Fetch {
			request: ApiRequest::delete("/api/posts/1"),
		};

		assert_eq!(
			serde_json::to_value(effect).unwrap(),
			json!({ "type": "fetch", "request": { "method": "DELETE", "path": "/api/posts/1" } })
		);
	}

	#[test]
	fn test_empty_state_escapes_text() {
		let html = empty_state("<Oops>", "Try again", html! { a href="/" { "Home" } });

		assert_eq!(
			html.into_string(),
			r#"<div class="empty-state"><h3>&lt;Oops&gt;</h3><p>Try again</p><a href="/">Home</a></div>"#
		);
	}

	#[test]
	fn test_fallback_serialization() {
		let fallback = Fallback::default()
			.on(
				"publish",
				vec![Effect::Alert {
					message: "offline".into(),
				}],
			)
			.draft(DRAFT_KEY);

		assert_eq!(
			serde_json::to_value(fallback).unwrap(),
			json!({
				"effects": { "publish": [{ "type": "alert", "message": "offline" }] },
				"draft_key": "blog_draft",
			})
		);
	}

	#[test]
	fn test_format() {
		let time = Utc.with_ymd_and_hms(2024, 3, 5, 14, 5, 0).unwrap();

		assert_eq!(format_date(&time), "March 5, 2024");
		assert_eq!(format_time(&time), "14:05 UTC");
	}
}
