use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Expr, FnArg, ItemFn};

/// Marks the function's entry point.
///
/// Generates a `main` that deserializes the input JSON, calls the annotated
/// function and serializes its result. Input is read from stdin and output is
/// written to stdout unless `input_stream` / `output_stream` expressions are
/// given, which is how tests drive the generated `main`:
///
/// ```ignore
/// #[discount_function(
///     input_stream = std::io::Cursor::new(INPUT.as_bytes()),
///     output_stream = OUTPUT.clone()
/// )]
/// fn run(input: input::Input) -> Result<discounts::FunctionResult> { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn discount_function(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input_stream: Option<Expr> = None;
    let mut output_stream: Option<Expr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("input_stream") {
            input_stream = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("output_stream") {
            output_stream = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported discount_function property"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    let ast = parse_macro_input!(item as ItemFn);
    let name = &ast.sig.ident;
    if ast.sig.inputs.len() != 1 {
        return quote! {compile_error!("Discount functions need exactly one input parameter");}
            .into();
    }

    let input_type = match ast.sig.inputs.first() {
        Some(FnArg::Typed(input)) => input.ty.as_ref(),
        _ => {
            return quote! {compile_error!("Discount functions can’t have a receiver");}.into()
        }
    };

    let input_stream = input_stream
        .map(|stream| quote! { #stream })
        .unwrap_or_else(|| quote! { std::io::stdin().lock() });
    let output_stream = output_stream
        .map(|stream| quote! { #stream })
        .unwrap_or_else(|| quote! { std::io::stdout().lock() });

    let gen = quote! {
        fn main() -> ::std::result::Result<(), Box<dyn ::std::error::Error>> {
            let input: #input_type = ::delivery_discount::serde_json::from_reader(
                ::std::io::BufReader::new(#input_stream),
            )?;
            let mut out = #output_stream;
            ::delivery_discount::serde_json::to_writer(&mut out, &#name(input)?)?;
            ::std::io::Write::flush(&mut out)?;
            Ok(())
        }
        #ast
    };

    gen.into()
}
