use rand::{Rng, seq::SliceRandom};

pub const VOCABULARY: &[&str] = &[
    "chicken",
    "paneer",
    "potato",
    "tomato",
    "onion",
    "spinach",
    "cauliflower",
    "peas",
    "chickpeas",
    "okra",
    "mushroom",
    "egg",
    "fish",
    "lentils",
    "carrot",
];

pub const MIN_PICK: usize = 2;
pub const MAX_PICK: usize = 4;

/// Random handful of distinct pantry ingredients for "feeling lucky".
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let count = rng.gen_range(MIN_PICK..=MAX_PICK);

    VOCABULARY
        .choose_multiple(rng, count)
        .map(|ingredient| ingredient.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::{MAX_PICK, MIN_PICK, VOCABULARY, pick};

    #[test]
    fn test_pick_bounds() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let picked = pick(&mut rng);
            let unique: HashSet<_> = picked.iter().collect();

            assert!((MIN_PICK..=MAX_PICK).contains(&picked.len()));
            assert_eq!(unique.len(), picked.len());
            assert!(picked.iter().all(|item| VOCABULARY.contains(&item.as_str())));
        }
    }
}
