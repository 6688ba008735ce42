//! # Nutrition Estimate
//!
//! Keyword table, not a nutrition database.
//!
//! - Each ingredient line is lowercased and checked against the keywords in table order
//! - First matching keyword contributes its values once for that line
//! - Unmatched lines contribute nothing
//! - Totals are multiplied by the serving ratio
use std::ops::{Add, AddAssign, Mul};

use crate::recipe::Recipe;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

const fn macros(calories: f64, protein: f64, carbs: f64, fat: f64) -> Macros {
    Macros {
        calories,
        protein,
        carbs,
        fat,
    }
}

// Hindi keywords sit next to their English counterpart so either display matches.
pub const TABLE: &[(&str, Macros)] = &[
    ("chicken", macros(239.0, 27.0, 0.0, 14.0)),
    ("मुर्गी", macros(239.0, 27.0, 0.0, 14.0)),
    ("mutton", macros(294.0, 25.0, 0.0, 21.0)),
    ("fish", macros(206.0, 22.0, 0.0, 12.0)),
    ("egg", macros(78.0, 6.0, 0.6, 5.0)),
    ("paneer", macros(265.0, 18.0, 1.2, 21.0)),
    ("पनीर", macros(265.0, 18.0, 1.2, 21.0)),
    ("dal", macros(116.0, 9.0, 20.0, 0.4)),
    ("दाल", macros(116.0, 9.0, 20.0, 0.4)),
    ("lentil", macros(116.0, 9.0, 20.0, 0.4)),
    ("rice", macros(130.0, 2.7, 28.0, 0.3)),
    ("चावल", macros(130.0, 2.7, 28.0, 0.3)),
    ("potato", macros(77.0, 2.0, 17.0, 0.1)),
    ("आलू", macros(77.0, 2.0, 17.0, 0.1)),
    ("tomato", macros(18.0, 0.9, 3.9, 0.2)),
    ("टमाटर", macros(18.0, 0.9, 3.9, 0.2)),
    ("onion", macros(40.0, 1.1, 9.3, 0.1)),
    ("प्याज़", macros(40.0, 1.1, 9.3, 0.1)),
    ("ghee", macros(112.0, 0.0, 0.0, 12.7)),
    ("घी", macros(112.0, 0.0, 0.0, 12.7)),
    ("oil", macros(120.0, 0.0, 0.0, 14.0)),
    ("तेल", macros(120.0, 0.0, 0.0, 14.0)),
    ("spinach", macros(23.0, 2.9, 3.6, 0.4)),
    ("peas", macros(81.0, 5.4, 14.0, 0.4)),
    ("cauliflower", macros(25.0, 1.9, 5.0, 0.3)),
    ("curd", macros(61.0, 3.5, 4.7, 3.3)),
    ("yogurt", macros(61.0, 3.5, 4.7, 3.3)),
];

impl Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        macros(
            self.calories + other.calories,
            self.protein + other.protein,
            self.carbs + other.carbs,
            self.fat + other.fat,
        )
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, other: Macros) {
        *self = *self + other;
    }
}

impl Mul<f64> for Macros {
    type Output = Macros;

    fn mul(self, factor: f64) -> Macros {
        macros(
            self.calories * factor,
            self.protein * factor,
            self.carbs * factor,
            self.fat * factor,
        )
    }
}

pub fn lookup(line: &str) -> Option<Macros> {
    let line = line.to_lowercase();

    TABLE
        .iter()
        .find(|(keyword, _)| line.contains(keyword))
        .map(|(_, values)| *values)
}

pub fn estimate(lines: &[String], ratio: f64) -> Macros {
    let mut total = Macros::default();

    for values in lines.iter().filter_map(|line| lookup(line)) {
        total += values;
    }

    total * ratio
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub total: Macros,
    pub per_serving: Macros,
    pub servings: u32,
}

/// Estimate for `recipe` cooked for `servings` people.
pub fn for_recipe(recipe: &Recipe, servings: u32) -> Estimate {
    let total = estimate(&recipe.ingredients, crate::servings::ratio(recipe.servings, servings));
    let per_serving = if servings == 0 {
        total
    } else {
        total * (1.0 / f64::from(servings))
    };

    Estimate {
        total,
        per_serving,
        servings,
    }
}
