//! Random sources
//!
//! Every generator takes `&mut impl Rng`. Tests pass a seeded
//! `ChaCha8Rng`; callers that do not care borrow the process-wide one.

use std::sync::{Mutex, OnceLock};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::config;

static SHARED_RNG: OnceLock<Mutex<ChaCha8Rng>> = OnceLock::new();

/// Deterministic generator for fixtures and reproducible batches
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Independent stream `stream` of the generator seeded with `seed`
pub fn seeded_stream(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

fn shared() -> &'static Mutex<ChaCha8Rng> {
    SHARED_RNG.get_or_init(|| {
        let rng = match config().seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Mutex::new(rng)
    })
}

/// Run `f` with exclusive access to the process-wide generator.
///
/// A panic inside a previous holder does not leave the generator in a
/// broken state, so a poisoned lock is recovered rather than propagated.
pub fn with_shared_rng<T>(f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
    let mut guard = shared().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}
