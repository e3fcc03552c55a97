/// The instruction prompt sent alongside every dish photo.
///
/// It asks the model for a bare JSON object whose keys match the fields of
/// [`crate::model::Recipe`]. Models do not always comply, which is why the
/// answer goes through [`crate::extractor::extract_recipe`].
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");
