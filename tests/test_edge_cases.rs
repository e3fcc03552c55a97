use chefcam::{extract_recipe, ChefCamError, Difficulty, Recipe};

#[test]
fn test_empty_object_yields_all_defaults() {
    let recipe = extract_recipe("{}").unwrap();
    assert_eq!(recipe, Recipe::default());
}

#[test]
fn test_null_and_empty_text_fields_use_defaults() {
    let input = r#"{
        "dishName": "",
        "shortDescription": null,
        "cuisine": false,
        "servings": [],
        "prepTime": {},
        "cookTime": "",
        "caloriesPerServing": null
    }"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe, Recipe::default());
}

#[test]
fn test_numeric_text_fields_are_coerced() {
    let input = r#"{"servings": 4, "prepTime": 15, "caloriesPerServing": 380.5}"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.servings, "4");
    assert_eq!(recipe.prep_time, "15");
    assert_eq!(recipe.calories_per_serving, "380.5");
}

#[test]
fn test_one_bad_field_does_not_affect_others() {
    let input = r#"{
        "dishName": "Pad Thai",
        "cuisine": ["Thai"],
        "difficulty": "medium",
        "ingredients": "noodles",
        "instructions": ["Soak noodles", {"step": 2}, "Stir fry"]
    }"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.dish_name, "Pad Thai");
    assert_eq!(recipe.cuisine, "Fusion");
    assert_eq!(recipe.difficulty, Difficulty::Medium);
    assert!(recipe.ingredients.is_empty());
    assert_eq!(recipe.instructions, vec!["Soak noodles", "Stir fry"]);
}

#[test]
fn test_ingredient_entries_get_independent_defaults() {
    let input = r#"{"ingredients": [
        {"item": "Basil"},
        {"amount": "2 tbsp"},
        {},
        {"item": "", "amount": null},
        {"item": 3, "amount": 100},
        "Parmesan",
        null,
        ["Garlic", "2 cloves"]
    ]}"#;
    let recipe = extract_recipe(input).unwrap();

    let pairs: Vec<(&str, &str)> = recipe
        .ingredients
        .iter()
        .map(|i| (i.item.as_str(), i.amount.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Basil", "To taste"),
            ("Ingredient", "2 tbsp"),
            ("Ingredient", "To taste"),
            ("Ingredient", "To taste"),
            ("3", "100"),
        ]
    );
}

#[test]
fn test_unknown_keys_are_ignored() {
    let input = r#"{"dishName": "Gyoza", "wine_pairing": "Riesling", "tags": ["dumplings"]}"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.dish_name, "Gyoza");
}

#[test]
fn test_nested_braces_inside_strings() {
    let input = r#"Result: {"dishName": "Curly {brace} cake", "instructions": ["Mix {dry} and {wet}"]} - done"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.dish_name, "Curly {brace} cake");
    assert_eq!(recipe.instructions, vec!["Mix {dry} and {wet}"]);
}

#[test]
fn test_two_json_objects_fail_to_parse() {
    // The outer-brace heuristic spans both objects
    let input = r#"{"dishName": "A"} and also {"dishName": "B"}"#;
    assert!(matches!(
        extract_recipe(input),
        Err(ChefCamError::MalformedResponse(_))
    ));
}

#[test]
fn test_braces_in_trailing_prose_fail_to_parse() {
    let input = r#"{"dishName": "Stew"} Note: keep the lid on {mostly}"#;
    assert!(matches!(
        extract_recipe(input),
        Err(ChefCamError::MalformedResponse(_))
    ));
}

#[test]
fn test_truncated_json_is_malformed_response() {
    let input = r#"```json
{"dishName": "Lasagna", "ingredients": [{"item": "Pasta sheets", "amount": "12"}"#;
    assert!(matches!(
        extract_recipe(input),
        Err(ChefCamError::MalformedResponse(_))
    ));
}

#[test]
fn test_json_array_response_uses_inner_object() {
    let input = r#"[{"dishName": "Bibimbap", "cuisine": "Korean"}]"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.dish_name, "Bibimbap");
    assert_eq!(recipe.cuisine, "Korean");
}

#[test]
fn test_unicode_content_is_preserved() {
    let input = "```json\n{\"dishName\": \"Crème brûlée\", \"cuisine\": \"Française\", \"instructions\": [\"Caraméliser le sucre 🔥\"]}\n```";
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.dish_name, "Crème brûlée");
    assert_eq!(recipe.cuisine, "Française");
    assert_eq!(recipe.instructions, vec!["Caraméliser le sucre 🔥"]);
}

#[test]
fn test_whitespace_only_steps_are_kept() {
    // Only empty strings are dropped; whitespace is real text
    let input = r#"{"instructions": ["  ", "Serve"]}"#;
    let recipe = extract_recipe(input).unwrap();

    assert_eq!(recipe.instructions, vec!["  ", "Serve"]);
}
