//! The HTML documents the pages are served as.
//!
//! Each document carries the page name and its [`Fallback`](super::Fallback)
//! on `<body>`; `/static/app.js` does the rest.

use maud::{html, Markup, DOCTYPE};

use super::{home::Home, view::View, write::Write, Controller, SITE_NAME};

const EDIT: &str = r#"{"type":"edit"}"#;
const DELETE: &str = r#"{"type":"delete"}"#;
const PUBLISH: &str = r#"{"type":"publish"}"#;

fn layout<C: Controller>(page: &str, title: &str, main: Markup) -> Result<Markup, serde_json::Error> {
	let fallback = serde_json::to_string(&C::fallback())?;

	Ok(html! {
		(DOCTYPE)
		html lang="en" {
			head {
				meta charset="utf-8";
				meta name="viewport" content="width=device-width, initial-scale=1";
				title { (title) }
				link rel="stylesheet" href="/static/style.css";
			}
			body data-page=(page) data-fallback=(fallback) {
				header.site-header {
					a.logo href="/" { (SITE_NAME) }
					nav {
						a href="/" { "Home" }
						a.btn-primary href="/write" { "Write" }
					}
				}
				(main)
				script src="/static/app.js" {}
			}
		}
	})
}

pub fn home() -> Result<Markup, serde_json::Error> {
	layout::<Home>(
		"home",
		SITE_NAME,
		html! {
			main.container {
				h1.page-title { "Latest Posts" }
				div #posts-list .posts-list {}
			}
		},
	)
}

/// The same document serves every post; the controller reads the id from the path.
pub fn view() -> Result<Markup, serde_json::Error> {
	layout::<View>(
		"view",
		SITE_NAME,
		html! {
			main.container {
				div.post-actions {
					a.btn-secondary href="/" { "← Back" }
					button.btn-secondary data-event=(EDIT) { "Edit" }
					button.btn-danger data-event=(DELETE) { "Delete" }
				}
				div #post-content {
					div.loading { "Loading post..." }
				}
			}
		},
	)
}

pub fn write() -> Result<Markup, serde_json::Error> {
	layout::<Write>(
		"write",
		&format!("Write - {SITE_NAME}"),
		html! {
			main.container.editor {
				section.editor-pane {
					label for="post-title" { "Title" }
					input #post-title type="text" placeholder="Post title" data-input-event="title_input";
					div #title-char-count .char-count {}
					label for="post-content" { "Content" }
					textarea #post-content rows="20" placeholder="Write your post... (# heading, - list item)" data-input-event="content_input" {}
					button #save-btn .btn-primary data-event=(PUBLISH) { "Publish Post" }
				}
				section.preview-pane {
					h2.pane-title { "Preview" }
					div #preview-content .preview {}
				}
			}
		},
	)
}
