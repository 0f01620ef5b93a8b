use proc_macro::TokenStream;
use quote::quote;

#[derive(deluxe::ParseMetaItem)]
#[deluxe(attributes(scoring_factor))]
struct FactorAttributes(syn::Ident, #[deluxe(flatten)] FactorNamedAttributes);

#[derive(deluxe::ParseMetaItem)]
struct FactorNamedAttributes {
  name: String,
  weight: f64,
}

/// Declares a scoring factor: a unit struct, its `Factor` implementation and
/// a trace span around the annotated scoring function.
#[proc_macro_attribute]
pub fn scoring_factor(attrs: TokenStream, input: TokenStream) -> TokenStream {
  let FactorAttributes(ident, FactorNamedAttributes { name, weight }) = deluxe::parse2::<FactorAttributes>(attrs.into()).unwrap();
  let input = proc_macro2::TokenStream::from(input);

  quote! {
      pub(crate) struct #ident;

      impl Factor for #ident {
        fn name(&self) -> &'static str {
            #name
        }

        fn weight(&self) -> f64 {
            #weight
        }

        #[tracing::instrument(level = "trace", name = #name, skip_all, fields(manufacturer_id = %candidate.id))]
        #input
      }
  }
  .into()
}
