//! Lenient extraction of a [`Recipe`] from a model's free-text answer.
//!
//! Models are asked for bare JSON but regularly wrap it in markdown fences or
//! surround it with chatty prose. Extraction cleans the text, cuts out the
//! outermost `{ ... }` span and maps whatever fields it finds onto a fully
//! defaulted recipe. Only a JSON syntax error is fatal.

use crate::error::ChefCamError;
use crate::model::{
    Difficulty, Ingredient, Recipe, DEFAULT_CALORIES, DEFAULT_COOK_TIME, DEFAULT_CUISINE,
    DEFAULT_DESCRIPTION, DEFAULT_DISH_NAME, DEFAULT_INGREDIENT_AMOUNT, DEFAULT_INGREDIENT_ITEM,
    DEFAULT_PREP_TIME, DEFAULT_SERVINGS,
};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

const FENCE: &str = "```";
const FENCE_LANGUAGE: &str = "json";

/// Every recipe field exactly as the model sent it, if it sent it at all.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawRecipe {
    dish_name: Option<Value>,
    short_description: Option<Value>,
    cuisine: Option<Value>,
    difficulty: Option<Value>,
    servings: Option<Value>,
    prep_time: Option<Value>,
    cook_time: Option<Value>,
    calories_per_serving: Option<Value>,
    ingredients: Option<Value>,
    instructions: Option<Value>,
    plating_tips: Option<Value>,
}

impl RawRecipe {
    fn from_value(value: Value) -> Self {
        match value {
            // Fields are all `Option<Value>`, so decoding an object cannot fail on shape
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            other => {
                debug!("Model returned a JSON {} instead of an object", json_kind(&other));
                RawRecipe::default()
            }
        }
    }
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Recipe {
            dish_name: text_or(raw.dish_name.as_ref(), DEFAULT_DISH_NAME),
            short_description: text_or(raw.short_description.as_ref(), DEFAULT_DESCRIPTION),
            cuisine: text_or(raw.cuisine.as_ref(), DEFAULT_CUISINE),
            difficulty: raw
                .difficulty
                .as_ref()
                .and_then(Value::as_str)
                .and_then(Difficulty::from_label)
                .unwrap_or_default(),
            servings: text_or(raw.servings.as_ref(), DEFAULT_SERVINGS),
            prep_time: text_or(raw.prep_time.as_ref(), DEFAULT_PREP_TIME),
            cook_time: text_or(raw.cook_time.as_ref(), DEFAULT_COOK_TIME),
            calories_per_serving: text_or(raw.calories_per_serving.as_ref(), DEFAULT_CALORIES),
            ingredients: ingredient_list(raw.ingredients.as_ref()),
            instructions: text_list(raw.instructions.as_ref()),
            plating_tips: text_list(raw.plating_tips.as_ref()),
        }
    }
}

/// Extract a recipe from the raw text a model returned.
///
/// # Errors
/// Returns [`ChefCamError::MalformedResponse`] when the JSON candidate is not
/// valid JSON. Missing fields, wrong types and unknown difficulty labels are
/// never errors; they fall back to defaults.
pub fn extract_recipe(raw: &str) -> Result<Recipe, ChefCamError> {
    let cleaned = strip_code_fences(raw);
    let candidate = json_candidate(&cleaned);
    debug!(
        "Parsing JSON candidate of {} bytes (raw response was {} bytes)",
        candidate.len(),
        raw.len()
    );

    let value: Value = serde_json::from_str(candidate).map_err(ChefCamError::MalformedResponse)?;

    Ok(RawRecipe::from_value(value).into())
}

/// Remove every markdown fence marker (```` ``` ```` with an optional `json`
/// tag in any case) and trim the result.
pub fn strip_code_fences(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(FENCE) {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if rest
            .get(..FENCE_LANGUAGE.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(FENCE_LANGUAGE))
        {
            rest = &rest[FENCE_LANGUAGE.len()..];
        }
    }
    cleaned.push_str(rest);

    cleaned.trim().to_string()
}

/// Slice from the first `{` to the last `}` inclusive, or return the whole
/// text when no such span exists.
///
/// This is a heuristic for a single object surrounded by prose. Several
/// objects, or braces inside the prose, produce a candidate that will
/// usually fail to parse.
pub fn json_candidate(cleaned: &str) -> &str {
    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    }
}

/// Text form of a scalar JSON value; empty for null, `false` and containers.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value.map(coerce_text) {
        Some(text) if !text.is_empty() => text,
        _ => default.to_string(),
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(coerce_text)
            .filter(|text| !text.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn ingredient_list(value: Option<&Value>) -> Vec<Ingredient> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|entry| Ingredient {
                item: text_or(entry.get("item"), DEFAULT_INGREDIENT_ITEM),
                amount: text_or(entry.get("amount"), DEFAULT_INGREDIENT_AMOUNT),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
