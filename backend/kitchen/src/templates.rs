//! # Templates
//!
//! The three fixed dishes. `{ingredient}` marks where a submitted ingredient goes.
//!
//! Instruction layout per language:
//! - `before`: fixed steps
//! - `lead`: names the first ingredient
//! - one `extra` step per remaining ingredient
//! - `after`: fixed steps
use rand::{Rng, seq::SliceRandom};

use crate::{RecipeError, recipe::Recipe};

const SLOT: &str = "{ingredient}";
const EXTRA_STEP: &str = "Add {ingredient} and mix well.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dish {
    Curry,
    Rice,
    DalTadka,
}

pub struct Steps {
    pub before: &'static [&'static str],
    pub lead: &'static str,
    pub extra: &'static str,
    pub after: &'static [&'static str],
}

pub struct Template {
    title: &'static str,
    title_hindi: &'static str,
    tail: &'static [&'static str],
    tail_hindi: &'static [&'static str],
    steps: Steps,
    steps_hindi: Steps,
    prep_time: &'static str,
    prep_time_hindi: &'static str,
    servings: u32,
}

impl Dish {
    pub const ALL: [Dish; 3] = [Dish::Curry, Dish::Rice, Dish::DalTadka];

    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Dish {
        *Self::ALL.choose(rng).unwrap_or(&Dish::Curry)
    }

    pub fn template(self) -> &'static Template {
        match self {
            Dish::Curry => &CURRY,
            Dish::Rice => &RICE,
            Dish::DalTadka => &DAL_TADKA,
        }
    }
}

fn fill(pattern: &str, ingredient: &str) -> String {
    pattern.replace(SLOT, ingredient)
}

fn owned(lines: &[&str]) -> impl Iterator<Item = String> {
    lines.iter().map(|line| line.to_string())
}

impl Steps {
    pub fn count(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }

    fn render(&self, first: &str, rest: &[String]) -> Vec<String> {
        let mut steps = Vec::with_capacity(self.count() + rest.len());

        steps.extend(owned(self.before));
        steps.push(fill(self.lead, first));
        steps.extend(rest.iter().map(|ingredient| fill(self.extra, ingredient)));
        steps.extend(owned(self.after));

        steps
    }
}

impl Template {
    pub fn title(&self, first: &str) -> String {
        fill(self.title, first)
    }

    /// Fixed instruction steps before any extra ingredient steps are added.
    pub fn step_count(&self) -> usize {
        self.steps.count()
    }

    pub fn render(&self, ingredients: &[String]) -> Result<Recipe, RecipeError> {
        let (first, rest) = ingredients
            .split_first()
            .ok_or(RecipeError::NoIngredients)?;

        Ok(Recipe {
            title: self.title(first),
            title_hindi: fill(self.title_hindi, first),
            ingredients: ingredients.iter().cloned().chain(owned(self.tail)).collect(),
            ingredients_hindi: ingredients
                .iter()
                .cloned()
                .chain(owned(self.tail_hindi))
                .collect(),
            instructions: self.steps.render(first, rest),
            instructions_hindi: self.steps_hindi.render(first, rest),
            prep_time: self.prep_time.to_string(),
            prep_time_hindi: self.prep_time_hindi.to_string(),
            servings: self.servings,
        })
    }
}

static CURRY: Template = Template {
    title: "Delicious {ingredient} Curry",
    title_hindi: "{ingredient} की स्वादिष्ट करी",
    tail: &[
        "2 tbsp ghee",
        "1 onion, chopped",
        "2 garlic cloves, minced",
        "1 inch ginger, grated",
        "2 green chilies, chopped",
        "1/2 tsp turmeric powder",
        "1 tsp red chili powder",
        "1 tsp coriander powder",
        "1 cup tomato puree",
        "Salt to taste",
        "Fresh coriander leaves",
    ],
    tail_hindi: &[
        "2 टेबलस्पून घी",
        "1 प्याज़, कटा हुआ",
        "2 लहसुन कलियां, कुची हुई",
        "1 इंच अदरक, कद्दूकस किया हुआ",
        "2 हरी मिर्च, कटी हुई",
        "1/2 टीस्पून हल्दी पाउडर",
        "1 टीस्पून लाल मिर्च पाउडर",
        "1 टीस्पून धनिया पाउडर",
        "1 कप टमाटर, प्यूरी",
        "नमक स्वादानुसार",
        "ताज़ा हरा धनिया",
    ],
    steps: Steps {
        before: &[
            "Heat ghee in a kadai or heavy-bottomed pan.",
            "Add chopped onion and sauté until golden brown.",
            "Add garlic, ginger, and green chilies, sauté for 1 minute.",
        ],
        lead: "Add {ingredient} and cook for 3-4 minutes, stirring occasionally.",
        extra: EXTRA_STEP,
        after: &[
            "Add all spices (turmeric, red chili powder, coriander powder) and sauté.",
            "Add tomato puree and cook until oil separates.",
            "Add 1/2 cup water, salt, and cook covered for 10-15 minutes.",
            "Garnish with fresh coriander and serve hot with roti or rice.",
        ],
    },
    steps_hindi: Steps {
        before: &[
            "एक कड़ाही में घी गर्म करें।",
            "इसमें कटा हुआ प्याज़ डालकर सुनहरा होने तक भूनें।",
            "लहसुन, अदरक और हरी मिर्च डालें और 1 मिनट भूनें।",
        ],
        lead: "अब {ingredient} डालें और 3-4 मिनट पकाएं।",
        extra: "{ingredient} डालें और अच्छी तरह मिलाएं।",
        after: &[
            "सभी मसाले डालें और भूनें।",
            "टमाटर प्यूरी डालें और मसाले छोड़ने तक पकाएं।",
            "1/2 कप पानी डालें, नमक डालें और ढककर 10-15 मिनट पकाएं।",
            "गार्निश के लिए हरा धनिया डालें और गर्मा-गर्म रोटी या चावल के साथ परोसें।",
        ],
    },
    prep_time: "25 minutes",
    prep_time_hindi: "25 मिनट",
    servings: 4,
};

static RICE: Template = Template {
    title: "Spicy {ingredient} Rice",
    title_hindi: "{ingredient} मसाला भात",
    tail: &[
        "2 cups rice, washed",
        "3 tbsp oil",
        "1 onion, finely chopped",
        "2 garlic cloves, minced",
        "1 tsp cumin seeds",
        "2 cardamoms",
        "1 cinnamon stick",
        "2 cloves",
        "1/2 tsp turmeric",
        "1 tsp garam masala",
        "Lemon juice",
    ],
    tail_hindi: &[
        "2 कप चावल, धुला हुआ",
        "3 टेबलस्पून तेल",
        "1 प्याज़, बारीक कटा हुआ",
        "2 लहसुन कलियां, कुची हुई",
        "1 टीस्पून जीरा",
        "2 इलायची",
        "1 दालचीनी",
        "2 लौंग",
        "1/2 टीस्पून हल्दी",
        "1 टीस्पून गरम मसाला",
        "नींबू का रस",
    ],
    steps: Steps {
        before: &[
            "Soak rice for 30 minutes, then drain.",
            "Heat oil in a pan, add cumin seeds and let them splutter.",
            "Add whole spices (cardamom, cinnamon, cloves).",
            "Add onion and sauté until golden brown.",
            "Add garlic and sauté for 1 minute.",
        ],
        lead: "Add {ingredient} and cook for 2-3 minutes.",
        extra: EXTRA_STEP,
        after: &[
            "Add turmeric and garam masala, mix well.",
            "Add washed rice and 4 cups water.",
            "Add salt, cover and cook on medium heat.",
            "When rice is cooked, add lemon juice and garnish with coriander.",
        ],
    },
    steps_hindi: Steps {
        before: &[
            "चावल को 30 मिनट पानी में भिगोएं, फिर छान लें।",
            "एक पैन में तेल गर्म करें, जीरा डालें और चमकने दें।",
            "सभी साबुत मसाले डालें।",
            "प्याज़ डालें और सुनहरा होने तक भूनें।",
            "लहसुन डालें और 1 मिनट भूनें।",
        ],
        lead: "अब {ingredient} डालें और 2-3 मिनट पकाएं।",
        extra: "{ingredient} डालें और मिलाएं।",
        after: &[
            "हल्दी और गरम मसाला डालें, अच्छी तरह मिलाएं।",
            "धुले हुए चावल डालें और 4 कप पानी डालें।",
            "नमक डालें, ढककर मध्यम आंच पर पकाएं।",
            "जब चावल पक जाएं, नींबू का रस डालें और धनिया से गार्निश करें।",
        ],
    },
    prep_time: "20 minutes",
    prep_time_hindi: "20 मिनट",
    servings: 4,
};

static DAL_TADKA: Template = Template {
    title: "{ingredient} Dal Tadka",
    title_hindi: "{ingredient} दाल तड़का",
    tail: &[
        "1 cup toor dal",
        "2 tbsp oil",
        "1 onion, chopped",
        "2 tomatoes, chopped",
        "1 tsp cumin seeds",
        "1 tsp mustard seeds",
        "Curry leaves",
        "Green chilies",
        "Garlic, chopped",
        "Turmeric, red chili powder",
        "Coriander powder",
    ],
    tail_hindi: &[
        "1 कप अरहर दाल",
        "2 टेबलस्पून तेल",
        "1 प्याज़, कटा हुआ",
        "2 टमाटर, कटे हुए",
        "1 टीस्पून जीरा",
        "1 टीस्पून राई",
        "कड़ी पत्ते",
        "हरी मिर्च",
        "लहसुन, कटा हुआ",
        "हल्दी, लाल मिर्च पाउडर",
        "धनिया पाउडर",
    ],
    steps: Steps {
        before: &[
            "Wash and soak dal for 30 minutes.",
            "Cook dal in pressure cooker with 2 cups water, turmeric, and salt for 2-3 whistles.",
            "Heat oil in a pan, add cumin and mustard seeds.",
            "Add garlic, green chilies, and curry leaves.",
            "Add onion and sauté until golden brown.",
            "Add tomatoes and cook until soft.",
        ],
        lead: "Add {ingredient} and cook for 2-3 minutes.",
        extra: EXTRA_STEP,
        after: &[
            "Add all spices and sauté for 1 minute.",
            "Add cooked dal and mix well.",
            "Add water if needed, bring to boil, and simmer for 5 minutes.",
            "Garnish with fresh coriander and serve hot with rice or roti.",
        ],
    },
    steps_hindi: Steps {
        before: &[
            "दाल को धोकर 30 मिनट भिगोएं।",
            "प्रेशर कुकर में दाल, 2 कप पानी, हल्दी और नमक डालकर 2-3 सीटी आने तक पकाएं।",
            "एक पैन में तेल गर्म करें, जीरा और राई डालें।",
            "लहसुन, हरी मिर्च और कड़ी पत्ते डालें।",
            "प्याज़ डालें और सुनहरा होने तक भूनें।",
            "टमाटर डालें और नरम होने तक पकाएं।",
        ],
        lead: "अब {ingredient} डालें और 2-3 मिनट पकाएं।",
        extra: "{ingredient} डालें और मिलाएं।",
        after: &[
            "सभी मसाले डालें और 1 मिनट भूनें।",
            "पकी हुई दाल डालें और अच्छी तरह मिलाएं।",
            "जरूरत के अनुसार पानी डालें, उबालें, और 5 मिनट तक सिम्मर करें।",
            "ताज़ा धनिया डालें और गर्मा-गर्म चावल या रोटी के साथ परोसें।",
        ],
    },
    prep_time: "30 minutes",
    prep_time_hindi: "30 मिनट",
    servings: 4,
};
