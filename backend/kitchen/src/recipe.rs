use serde::{Deserialize, Serialize};

/// Wire format of a generated recipe, both languages side by side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub title_hindi: String,
    pub ingredients: Vec<String>,
    pub ingredients_hindi: Vec<String>,
    pub instructions: Vec<String>,
    pub instructions_hindi: Vec<String>,
    pub prep_time: String,
    pub prep_time_hindi: String,
    pub servings: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }

    /// BCP 47 tag of the regional voice we would like to hear.
    pub fn regional_voice(self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }
}

impl Recipe {
    pub fn title_in(&self, language: Language) -> &str {
        match language {
            Language::English => &self.title,
            Language::Hindi => &self.title_hindi,
        }
    }

    pub fn ingredients_in(&self, language: Language) -> &[String] {
        match language {
            Language::English => &self.ingredients,
            Language::Hindi => &self.ingredients_hindi,
        }
    }

    pub fn instructions_in(&self, language: Language) -> &[String] {
        match language {
            Language::English => &self.instructions,
            Language::Hindi => &self.instructions_hindi,
        }
    }

    pub fn prep_time_in(&self, language: Language) -> &str {
        match language {
            Language::English => &self.prep_time,
            Language::Hindi => &self.prep_time_hindi,
        }
    }

    /// Text handed to speech synthesis.
    pub fn narration(&self, language: Language) -> String {
        let (prep, ingredients, instructions) = match language {
            Language::English => ("Preparation time", "Ingredients", "Instructions"),
            Language::Hindi => ("तैयारी का समय", "सामग्री", "विधि"),
        };

        let steps: Vec<String> = self
            .instructions_in(language)
            .iter()
            .enumerate()
            .map(|(index, step)| format!("{}. {}", index + 1, step))
            .collect();

        format!(
            "{}. {}: {}. {}: {}. {}: {}",
            self.title_in(language),
            prep,
            self.prep_time_in(language),
            ingredients,
            self.ingredients_in(language).join(", "),
            instructions,
            steps.join(" "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Language, Recipe};

    fn recipe() -> Recipe {
        Recipe {
            title: "Spicy okra Rice".to_string(),
            title_hindi: "okra मसाला भात".to_string(),
            ingredients: vec!["okra".to_string(), "2 cups rice, washed".to_string()],
            ingredients_hindi: vec!["okra".to_string(), "2 कप चावल, धुला हुआ".to_string()],
            instructions: vec!["Soak rice.".to_string(), "Add okra.".to_string()],
            instructions_hindi: vec!["चावल भिगोएं।".to_string(), "okra डालें।".to_string()],
            prep_time: "20 minutes".to_string(),
            prep_time_hindi: "20 मिनट".to_string(),
            servings: 4,
        }
    }

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_value(recipe()).unwrap();

        assert_eq!(json["titleHindi"], "okra मसाला भात");
        assert_eq!(json["prepTimeHindi"], "20 मिनट");
        assert_eq!(json["servings"], 4);
        assert!(json["ingredientsHindi"].is_array());
        assert!(json["instructionsHindi"].is_array());
    }

    #[test]
    fn test_narration_english() {
        let text = recipe().narration(Language::English);

        assert_eq!(
            text,
            "Spicy okra Rice. Preparation time: 20 minutes. Ingredients: okra, 2 cups rice, washed. Instructions: 1. Soak rice. 2. Add okra."
        );
    }

    #[test]
    fn test_narration_hindi() {
        let text = recipe().narration(Language::Hindi);

        assert!(text.starts_with("okra मसाला भात"));
        assert!(text.contains("20 मिनट"));
        assert!(text.contains("1. चावल भिगोएं।"));
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Language::English.toggle(), Language::Hindi);
        assert_eq!(Language::Hindi.toggle().toggle(), Language::Hindi);
    }
}
