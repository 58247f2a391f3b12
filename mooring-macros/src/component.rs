use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    parse::{Parse, ParseStream},
    spanned::Spanned,
    ItemFn, LitStr,
};

pub struct Component(ItemFn);

impl Parse for Component {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let item_fn: ItemFn = input.parse()?;
        if let Some(asyncness) = &item_fn.sig.asyncness {
            return Err(syn::Error::new(
                asyncness.span(),
                "components render synchronously and cannot be async",
            ));
        }
        Ok(Self(item_fn))
    }
}

impl ToTokens for Component {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let block = &self.0.block;
        let ident = &self.0.sig.ident;
        let name = LitStr::new(&ident.to_string().to_case(Case::Pascal), ident.span());

        let mut item_fn = self.0.clone();
        item_fn.block = syn::parse_quote_spanned! {block.span() => {
            ::mooring::Node::component(#name, move || #block)
        }};

        item_fn.to_tokens(tokens);
    }
}
