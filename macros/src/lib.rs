//! Derive macros for Event Place
//!
//! Action enums of a flow mix two kinds of variants: intents dispatched by a
//! view (a click, a keystroke) and outcomes fed back by an effect once async
//! work settles. Tagging them lets the runtime and the reducers log and filter
//! without hand-written matches.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates classification helpers for action enums
//!
//! # Example
//!
//! ```ignore
//! use event_place_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CheckoutAction {
//!     #[intent]
//!     Pay { number: String },
//!
//!     #[outcome]
//!     PaymentSettled { approved: bool },
//! }
//!
//! // Generated methods:
//! assert!(CheckoutAction::Pay { number: "0190000000".into() }.is_intent());
//! assert!(CheckoutAction::PaymentSettled { approved: true }.is_outcome());
//! assert_eq!(CheckoutAction::PaymentSettled { approved: true }.name(), "PaymentSettled");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_intent()` - Returns true if this variant is dispatched by a view
/// - `is_outcome()` - Returns true if this variant is fed back by an effect
/// - `name()` - Returns the variant name, for logs and metrics labels
///
/// # Attributes
///
/// - `#[intent]` - Mark a variant as a user intent
/// - `#[outcome]` - Mark a variant as the outcome of async work
///
/// Untagged variants answer `false` to both predicates.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[intent]` and `#[outcome]` attributes
#[proc_macro_derive(Action, attributes(intent, outcome))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut intent_arms = Vec::new();
    let mut outcome_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_intent = has_attribute(&variant.attrs, "intent");
        let is_outcome = has_attribute(&variant.attrs, "outcome");

        if is_intent && is_outcome {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[intent] and #[outcome]",
            )
            .to_compile_error()
            .into();
        }

        let pattern = variant_pattern(&variant.ident, &variant.fields);
        let label = variant.ident.to_string();

        intent_arms.push(quote! { #pattern => #is_intent, });
        outcome_arms.push(quote! { #pattern => #is_outcome, });
        name_arms.push(quote! { #pattern => #label, });
    }

    // An enum without variants has no value to match on
    let body = |arms: &[TokenStream2]| {
        if arms.is_empty() {
            quote! { match *self {} }
        } else {
            quote! { match self { #(#arms)* } }
        }
    };
    let intent_body = body(&intent_arms);
    let outcome_body = body(&outcome_arms);
    let name_body = body(&name_arms);

    let expanded = quote! {
        impl #name {
            /// Returns true if this action is dispatched by a view
            #[must_use]
            pub const fn is_intent(&self) -> bool {
                #intent_body
            }

            /// Returns true if this action is fed back by an effect
            #[must_use]
            pub const fn is_outcome(&self) -> bool {
                #outcome_body
            }

            /// Returns the variant name
            #[must_use]
            pub const fn name(&self) -> &'static str {
                #name_body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Builds a pattern matching any value of the variant, whatever its shape
fn variant_pattern(variant: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(_) => quote! { Self::#variant { .. } },
        Fields::Unnamed(_) => quote! { Self::#variant(..) },
        Fields::Unit => quote! { Self::#variant },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
