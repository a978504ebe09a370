mod model;
mod route;

use proc_macro::TokenStream;

/// Creates a new documentation function for the route, named after the original function with the suffix `_docs`.
///
/// The first line of the doc comment becomes the summary, the remaining lines the description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Creates a new struct `XInput` for the model, holding the fields a client may supply.
///
/// Fields marked `#[model(readonly)]` are skipped. All other fields keep their
/// `serde`, `validate` and doc attributes, and the struct keeps its derives.
#[proc_macro_attribute]
pub fn model(_args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(input)
}
