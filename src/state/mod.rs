pub mod trading_floor;

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use trading_floor::TradingFloor;

/// Shared, seedable random source for every mock generator.
///
/// The lock is only held for one synchronous generation call, never across
/// an await.
#[derive(Clone)]
pub struct MockRng {
    inner: Arc<Mutex<StdRng>>,
}

impl MockRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { inner: Arc::new(Mutex::new(rng)) }
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}
