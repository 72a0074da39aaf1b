// Handler module macro implementation
// Collects the public functions of an inline module into an export table

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_quote, Ident, Item, ItemMod, Visibility};

/// Handler functions are named like HTTP methods: uppercase ASCII only
// Pure function: same input → same output
fn is_handler_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase())
}

/// Public functions declared directly in the module, in source order
fn public_functions(items: &[Item]) -> Vec<Ident> {
    items
        .iter()
        .filter_map(|item| match item {
            Item::Fn(function) if matches!(function.vis, Visibility::Public(_)) => {
                Some(function.sig.ident.clone())
            }
            _ => None,
        })
        .collect()
}

pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new(attr.span(), "#[handlers] takes no arguments"));
    }

    let mut module: ItemMod = syn::parse2(item).map_err(|e| {
        syn::Error::new(e.span(), "#[handlers] can only be applied to a module")
    })?;

    let module_span = module.span();
    let Some((_, items)) = module.content.as_mut() else {
        return Err(syn::Error::new(
            module_span,
            "#[handlers] needs an inline module body: `mod name { ... }`",
        ));
    };

    let exported = public_functions(items);
    let export_names: Vec<String> = exported.iter().map(Ident::to_string).collect();

    let handler_fns: Vec<&Ident> = exported
        .iter()
        .filter(|ident| is_handler_name(&ident.to_string()))
        .collect();
    let handler_names: Vec<String> = handler_fns.iter().map(|ident| ident.to_string()).collect();

    items.push(parse_quote! {
        /// Names of every public function in this handler module
        #[allow(dead_code)]
        pub const EXPORT_NAMES: &[&str] = &[#(#export_names),*];
    });

    items.push(parse_quote! {
        /// Handler exports of this module
        #[allow(dead_code)]
        pub fn exports<S>() -> ::dirroute::ModuleExports<::dirroute::axum::AxumHandler<S>>
        where
            S: ::std::clone::Clone + ::std::marker::Send + ::std::marker::Sync + 'static,
        {
            ::dirroute::ModuleExports::new()
                #(.export(#handler_names, ::dirroute::axum::handler(#handler_fns)))*
        }
    });

    module.attrs.push(parse_quote!(#[allow(non_snake_case)]));

    Ok(quote!(#module))
}
