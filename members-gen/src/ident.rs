// Binding and type parameter names for one arity, plus list rendering.
//
// INVARIANT: names are a pure function of the 1-based field index. Same index,
// same name, every run.

/// Identifiers per rendered line before wrapping.
pub const WRAP_EVERY: usize = 20;

/// Name of the `j`-th binding: `_001`, `_002`, ...
///
/// The leading underscore keeps the names out of the way of user and library
/// identifiers and silences unused-variable lints in the generated code.
pub fn binding_ident(j: usize) -> String {
    format!("_{:03}", j)
}

/// Name of the type parameter for the `j`-th field: `T001`, `T002`, ...
pub fn type_param(j: usize) -> String {
    format!("T{:03}", j)
}

pub fn binding_idents(k: usize) -> Vec<String> {
    (1..=k).map(binding_ident).collect()
}

pub fn type_params(k: usize) -> Vec<String> {
    (1..=k).map(type_param).collect()
}

/// Join `items` with `", "`, starting a new line indented by `indent` after
/// every `WRAP_EVERY` items. A list that ends on a multiple of `WRAP_EVERY`
/// gets no trailing break.
pub fn render_list<S: AsRef<str>>(items: &[S], indent: &str) -> String {
    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            if idx % WRAP_EVERY == 0 {
                out.push_str(",\n");
                out.push_str(indent);
            } else {
                out.push_str(", ");
            }
        }
        out.push_str(item.as_ref());
    }
    out
}

/// `render_list` in parentheses. A single element gets the trailing comma
/// that makes it a tuple rather than a parenthesized expression.
pub fn render_tuple<S: AsRef<str>>(items: &[S], indent: &str) -> String {
    if items.len() == 1 {
        format!("({},)", items[0].as_ref())
    } else {
        format!("({})", render_list(items, indent))
    }
}
