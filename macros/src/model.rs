use darling::{ast, FromDeriveInput, FromField, FromMeta};
use quote::{format_ident, quote};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs(derive, serde))]
struct ModelInputReceiver {
	ident: syn::Ident,

	generics: syn::Generics,

	data: ast::Data<(), ModelFieldReceiver>,

	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(forward_attrs(doc, serde, validate))]
struct ModelFieldReceiver {
	ident: Option<syn::Ident>,

	ty: syn::Type,
	vis: syn::Visibility,

	attrs: Vec<syn::Attribute>,
}

/// Options accepted by `#[model(...)]` on a field.
#[derive(Debug, Default, FromMeta)]
struct FieldOptions {
	/// The field is assigned by the server and never accepted from the client.
	#[darling(default)]
	readonly: bool,
}

fn is_model_attr(attr: &syn::Attribute) -> bool {
	attr.path().is_ident("model")
}

/// Reads the `#[model(...)]` options of a field, if any.
fn field_options(field: &syn::Field) -> darling::Result<FieldOptions> {
	let mut options = FieldOptions::default();

	for attr in field.attrs.iter().filter(|attr| is_model_attr(attr)) {
		let parsed = FieldOptions::from_meta(&attr.meta)?;
		options.readonly |= parsed.readonly;
	}

	Ok(options)
}

pub fn from_input(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let mut input = syn::parse_macro_input!(input as syn::DeriveInput);

	let syn::Data::Struct(ref mut data) = input.data else {
		return syn::Error::new_spanned(&input.ident, "#[model] only supports structs")
			.into_compile_error()
			.into();
	};

	// Collect the readonly flags before stripping the helper attributes, since
	// they would otherwise reach the derive macros on the model.
	let mut readonly = Vec::new();

	for field in data.fields.iter_mut() {
		match field_options(field) {
			Ok(options) => readonly.push(options.readonly),
			Err(e) => return e.write_errors().into(),
		}

		field.attrs.retain(|attr| !is_model_attr(attr));
	}

	let receiver = match ModelInputReceiver::from_derive_input(&input) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let input_ident = format_ident!("{}Input", ident);
	let attrs = &receiver.attrs;
	let doc = format!("The client-supplied fields of a [`{ident}`].");

	let fields = match receiver.data.take_struct() {
		Some(fields) => fields,
		None => {
			return syn::Error::new_spanned(ident, "#[model] requires named fields")
				.into_compile_error()
				.into()
		}
	};

	let input_fields = fields
		.iter()
		.zip(readonly)
		.filter(|(_, readonly)| !readonly)
		.filter_map(|(field, _)| {
			let ident = field.ident.as_ref()?;
			let ty = &field.ty;
			let attrs = &field.attrs;
			let vis = &field.vis;

			Some(quote! {
				#(#attrs)*
				#vis #ident: #ty,
			})
		});

	quote! {
		#input

		#[doc = #doc]
		#(#attrs)*
		#vis struct #input_ident #generics {
			#(
				#input_fields
			)*
		}
	}
	.into()
}
