use std::sync::{Arc, Mutex};

use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub rng: Mutex<StdRng>,
}

impl State {
    pub fn new(config: Config) -> Arc<Self> {
        let rng = match config.recipe_seed {
            Some(seed) => {
                info!("Seeding recipe picker with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Arc::new(Self {
            config,
            rng: Mutex::new(rng),
        })
    }
}
