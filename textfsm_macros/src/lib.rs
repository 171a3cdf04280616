// TextFSM: Template-driven parsing of network device CLI output
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # TextFSM template macro
//!
//! This crate provides [`textfsm_template!`], which turns a TextFSM template file into a typed
//! parser at compile time.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::path::PathBuf;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Error, Ident, LitStr, Result, Token};
use textfsm::Options;
use textfsm_codegen::{generate_items, TemplateSource};

/// # Generate a typed parser from a template file
///
/// ```ignore
/// textfsm_template!(ShowInterface, "templates/show_interface.textfsm");
/// ```
///
/// The path is relative to the directory of the `Cargo.toml` of the calling crate. The template
/// is parsed while compiling, and every template error is reported as a compile error. The macro
/// expands to the parser `ShowInterface`, the row type `ShowInterfaceRow`, the template text
/// `SHOW_INTERFACE_TEMPLATE` and the compiled template `SHOW_INTERFACE`. The name of the template
/// is the file stem (`show_interface`). The expansion includes the template file, such that the
/// crate is rebuilt whenever the template changes.
///
/// A trailing `record_at_eof` flag makes `parse` keep the record in progress at the end of the
/// input:
///
/// ```ignore
/// textfsm_template!(ShowSubscription, "templates/show_subscription.textfsm", record_at_eof);
/// ```
#[proc_macro]
pub fn textfsm_template(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as MacroInput);

    match expand(input) {
        Ok(result) => result.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct MacroInput {
    type_name: Ident,
    path: LitStr,
    options: Options,
}

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let type_name: Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let path: LitStr = input.parse()?;
        let mut options = Options::default();
        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            let flag: Ident = input.parse()?;
            match flag.to_string().as_str() {
                "record_at_eof" => options.record_at_eof = true,
                other => return Err(Error::new(flag.span(), format!("Unknown option: {}", other))),
            }
        }
        Ok(Self { type_name, path, options })
    }
}

fn expand(input: MacroInput) -> Result<TokenStream2> {
    let span = input.path.span();
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| Error::new(span, "CARGO_MANIFEST_DIR is not set"))?;
    let path = PathBuf::from(manifest_dir).join(input.path.value());

    let text = std::fs::read_to_string(&path)
        .map_err(|e| Error::new(span, format!("Cannot read {}: {}", path.display(), e)))?;
    let template_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::new(span, format!("Invalid template path: {}", path.display())))?
        .to_string();

    let source = TemplateSource {
        type_name: input.type_name.to_string(),
        template_name,
        text,
        options: input.options,
    };
    let items = generate_items(&source).map_err(|e| Error::new(span, e.to_string()))?;
    let items: TokenStream2 = items
        .parse()
        .map_err(|e| Error::new(span, format!("Cannot parse the generated code: {:?}", e)))?;

    let include = path.display().to_string();
    Ok(quote! {
        #items
        const _: &str = include_str!(#include);
    })
}
