use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error, extract::Json};

pub mod tag {
	pub const POST: &str = "Post";
	pub const PAGE: &str = "Page";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Mini Blog")
		.summary("A single-user blog backed by a JSON file")
		.description(
			"Posts are stored newest first. Titles and contents are plain text with \
			 markdown-lite formatting, rendered by the page controllers.",
		)
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Post management".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::PAGE.into(),
			description: Some("Page controller events".into()),
			..Default::default()
		})
		.default_response_with::<Json<error::ErrorBody>, _>(|res| {
			res.example(error::ErrorBody {
				error: "Post not found".into(),
				errors: error::Message::new("unknown_post")
					.detail("post", "0f8fad5bd9cb469fa165d6e4a4b7a6c2")
					.into_vec(),
			})
		})
}
