//! Markdown-lite: a line-based subset of markdown.
//!
//! Each line is rendered on its own, with the first matching rule winning:
//! `###`, `##` and `#` headers, `-` list items, then paragraphs. Empty lines
//! become `<br>`. List items are not wrapped in a list element.

use lazy_static::lazy_static;
use regex::Regex;

use crate::sanitize::escape;

/// Average reading speed used for read-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
	static ref RULES: [(Regex, &'static str); 4] = [
		(Regex::new(r"^###\s+").unwrap(), "h3"),
		(Regex::new(r"^##\s+").unwrap(), "h2"),
		(Regex::new(r"^#\s+").unwrap(), "h1"),
		(Regex::new(r"^-\s+").unwrap(), "li"),
	];
	static ref MARKER: Regex = Regex::new(r"^(#+|-)\s+").unwrap();
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
	text.split('\n')
		.map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn render_line(line: &str) -> String {
	for (pattern, tag) in RULES.iter() {
		if let Some(marker) = pattern.find(line) {
			return format!("<{tag}>{}</{tag}>", escape(&line[marker.end()..]));
		}
	}

	if line.is_empty() {
		"<br>".to_owned()
	} else {
		format!("<p>{}</p>", escape(line))
	}
}

/// Renders markdown-lite text to an HTML fragment. All text is escaped.
pub fn render(text: &str) -> String {
	lines(text).map(render_line).collect()
}

/// Removes header and list markers and joins the lines with spaces.
pub fn strip(text: &str) -> String {
	lines(text)
		.map(|line| MARKER.replace(line, ""))
		.collect::<Vec<_>>()
		.join(" ")
}

/// Returns the first `limit` characters of the stripped text, escaped, with
/// an ellipsis when anything was cut off.
pub fn preview(text: &str, limit: usize) -> String {
	let plain = strip(text);

	if plain.chars().count() <= limit {
		return escape(&plain);
	}

	let cut = plain.chars().take(limit).collect::<String>();
	format!("{}...", escape(&cut))
}

/// Estimated reading time in whole minutes, never less than one.
pub fn read_time(text: &str) -> usize {
	text.split_whitespace()
		.count()
		.div_ceil(WORDS_PER_MINUTE)
		.max(1)
}
