use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DISH_NAME: &str = "Unknown Dish";
pub const DEFAULT_DESCRIPTION: &str = "A delicious dish identified from your photo.";
pub const DEFAULT_CUISINE: &str = "Fusion";
pub const DEFAULT_SERVINGS: &str = "2-3";
pub const DEFAULT_PREP_TIME: &str = "20 min";
pub const DEFAULT_COOK_TIME: &str = "30 min";
pub const DEFAULT_CALORIES: &str = "Approx. 450 kcal";
pub const DEFAULT_INGREDIENT_ITEM: &str = "Ingredient";
pub const DEFAULT_INGREDIENT_AMOUNT: &str = "To taste";

/// How hard a dish is to cook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Exact, case-sensitive match against the three known labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
}

/// A fully populated recipe as identified from a dish photo.
///
/// Every field always carries a value; gaps in the model's answer are
/// filled from the defaults above when the recipe is extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub dish_name: String,
    pub short_description: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub servings: String,
    pub prep_time: String,
    pub cook_time: String,
    pub calories_per_serving: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub plating_tips: Vec<String>,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            dish_name: DEFAULT_DISH_NAME.to_string(),
            short_description: DEFAULT_DESCRIPTION.to_string(),
            cuisine: DEFAULT_CUISINE.to_string(),
            difficulty: Difficulty::default(),
            servings: DEFAULT_SERVINGS.to_string(),
            prep_time: DEFAULT_PREP_TIME.to_string(),
            cook_time: DEFAULT_COOK_TIME.to_string(),
            calories_per_serving: DEFAULT_CALORIES.to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            plating_tips: Vec::new(),
        }
    }
}

impl Recipe {
    /// Render the recipe as a plain-text card for terminals and logs.
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.dish_name));
        output.push_str(&format!("{}\n\n", self.short_description));
        output.push_str(&format!(
            "Cuisine: {} | Difficulty: {} | Serves: {}\n",
            self.cuisine, self.difficulty, self.servings
        ));
        output.push_str(&format!(
            "Prep: {} | Cook: {} | Calories: {}\n",
            self.prep_time, self.cook_time, self.calories_per_serving
        ));

        if !self.ingredients.is_empty() {
            output.push_str("\n## Ingredients\n\n");
            for ingredient in &self.ingredients {
                output.push_str(&format!("- {} ({})\n", ingredient.item, ingredient.amount));
            }
        }

        if !self.instructions.is_empty() {
            output.push_str("\n## Instructions\n\n");
            for (i, step) in self.instructions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, step));
            }
        }

        if !self.plating_tips.is_empty() {
            output.push_str("\n## Plating tips\n\n");
            for tip in &self.plating_tips {
                output.push_str(&format!("- {}\n", tip));
            }
        }

        output
    }
}
