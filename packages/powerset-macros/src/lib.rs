use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Expr, GenericArgument, Ident, PathArguments, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token,
};

/// A single `name: Type = default` entry of a `config!` block.
///
/// Nested config sections use `name: Type (PartialType = default)` so that the
/// TOML side can leave the whole section out.
struct ConfigField {
    attrs: Vec<Attribute>,
    name: Ident,
    ty: Type,
    default_value: Expr,
    partial_ty: Option<Type>,
}

impl Parse for ConfigField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty: Type = input.parse()?;

        let (partial_ty, default_value) = if input.peek(token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let partial_ty: Type = content.parse()?;
            content.parse::<Token![=]>()?;
            (Some(partial_ty), content.parse()?)
        } else {
            input.parse::<Token![=]>()?;
            (None, input.parse()?)
        };

        Ok(ConfigField {
            attrs,
            name,
            ty,
            default_value,
            partial_ty,
        })
    }
}

impl ConfigField {
    /// The type this field has inside the `Partial*` struct that is read from
    /// TOML. Plain fields become optional, nested sections use their own
    /// partial type.
    fn partial_type(&self) -> TokenStream2 {
        let ty = &self.ty;
        match &self.partial_ty {
            Some(pt) => quote! { #pt },
            None if is_option(ty) => quote! { #ty },
            None => quote! { Option<#ty> },
        }
    }

    fn accessors(&self) -> TokenStream2 {
        let name = &self.name;
        let ty = &self.ty;
        let with_name = format_ident!("with_{}", name);
        let set_name = format_ident!("set_{}", name);
        let get_name = format_ident!("get_{}", name);

        quote! {
            pub fn #with_name(mut self, #name: #ty) -> Self {
                self.#name = #name;
                self
            }
            pub fn #set_name(&mut self, #name: #ty) {
                self.#name = #name;
            }
            pub fn #get_name(&self) -> &#ty {
                &self.#name
            }
        }
    }
}

struct ConfigInput {
    attrs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
    fields: Punctuated<ConfigField, Token![,]>,
}

impl Parse for ConfigInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name: Ident = input.parse()?;
        let content;
        syn::braced!(content in input);
        let fields = content.parse_terminated(ConfigField::parse, Token![,])?;
        Ok(ConfigInput {
            attrs,
            vis,
            name,
            fields,
        })
    }
}

/// Checks whether a type is spelled `Option<T>`, so optional settings are not
/// wrapped a second time in the partial struct.
fn is_option(ty: &Type) -> bool {
    let Type::Path(tp) = ty else {
        return false;
    };
    let Some(seg) = tp.path.segments.last() else {
        return false;
    };
    if seg.ident != "Option" {
        return false;
    }
    match &seg.arguments {
        PathArguments::AngleBracketed(args) => {
            args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_))
        }
        _ => false,
    }
}

/// Declares a configuration struct together with a `Partial*` twin that can be
/// deserialized from TOML with every key optional. Missing keys fall back to
/// the declared defaults, unknown keys are rejected.
#[proc_macro]
pub fn config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ConfigInput);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let struct_name = &input.name;
    let partial_struct_name = format_ident!("Partial{}", struct_name);

    let fields = input.fields.iter().map(|f| {
        let field_attrs = &f.attrs;
        let name = &f.name;
        let ty = &f.ty;
        quote! { #( #field_attrs )* #name: #ty }
    });

    let partial_fields = input.fields.iter().map(|f| {
        let name = &f.name;
        let partial_ty = f.partial_type();
        quote! { #[serde(default)] #name: #partial_ty }
    });

    let from_partial_assignments = input.fields.iter().map(|f| {
        let name = &f.name;
        let default_value = &f.default_value;
        quote! { #name: partial.#name.into_or(#default_value) }
    });

    let default_assignments = input.fields.iter().map(|f| {
        let name = &f.name;
        let default_value = &f.default_value;
        quote! { #name: #default_value }
    });

    let accessors = input.fields.iter().map(ConfigField::accessors);

    let expanded = quote! {
        #( #attrs )*
        #[derive(Debug, Clone, serde::Serialize)]
        #vis struct #struct_name {
            #( #fields, )*
        }

        #[derive(Debug, Clone, Default, serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        #vis struct #partial_struct_name {
            #( #partial_fields, )*
        }

        impl #struct_name {
            pub fn from_partial(partial: #partial_struct_name) -> Self {
                use crate::config::IntoOr;
                Self {
                    #( #from_partial_assignments, )*
                }
            }
            pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
                Ok(Self::from_partial(toml::from_str(content)?))
            }
            pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
                use anyhow::Context;
                let path = file_path.as_ref();
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_toml_str(&content)
                    .with_context(|| format!("failed to parse config file {}", path.display()))
            }
            pub fn from_optional_file<P: AsRef<std::path::Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
                match file_path {
                    Some(p) => Self::from_file(p),
                    None => Ok(Self::default()),
                }
            }
            #( #accessors )*
        }

        impl Default for #struct_name {
            fn default() -> Self {
                #struct_name {
                    #( #default_assignments, )*
                }
            }
        }

        impl crate::config::IntoOr<#struct_name> for Option<#partial_struct_name> {
            fn into_or(self, or: #struct_name) -> #struct_name {
                match self {
                    Some(t) => #struct_name::from_partial(t),
                    None => or,
                }
            }
        }
    };
    TokenStream::from(expanded)
}
