#![warn(clippy::use_self)]

mod component;

use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Turns a function returning a `Node` into a component body.
///
/// Hooks such as `on_mount` and contexts registered while the body runs belong to the component
/// boundary the function now returns.
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[component] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    parse_macro_input!(input as component::Component)
        .into_token_stream()
        .into()
}
