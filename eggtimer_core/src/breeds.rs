//! Decorative "chicken breed" fact with a built-in fallback list.
//!
//! The breed source is never allowed to block or fail the caller: it runs on a
//! worker thread and anything other than a non-empty answer within the
//! timeout yields an entry from [`FALLBACK_BREEDS`].

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel as xch;
use eggtimer_traits::{Breed, BreedSource};

use crate::config::BreedCfg;

/// `(name, origin, egg color)`
pub const FALLBACK_BREEDS: &[(&str, &str, &str)] = &[
    ("Leghorn", "Italy", "white"),
    ("Rhode Island Red", "United States", "brown"),
    ("Plymouth Rock", "United States", "brown"),
    ("Sussex", "England", "cream"),
    ("Orpington", "England", "brown"),
    ("Marans", "France", "dark brown"),
    ("Araucana", "Chile", "blue"),
    ("Australorp", "Australia", "brown"),
    ("Wyandotte", "United States", "brown"),
    ("Ameraucana", "United States", "blue"),
    ("Welsummer", "Netherlands", "speckled dark brown"),
    ("Silkie", "China", "cream"),
];

/// Where a [`BreedFact`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedOrigin {
    Source,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedFact {
    pub breed: Breed,
    pub origin: BreedOrigin,
}

/// Fallback entry at `index`, wrapping around the list.
pub fn fallback_breed(index: usize) -> Breed {
    let (name, origin, color) = FALLBACK_BREEDS[index % FALLBACK_BREEDS.len()];
    Breed {
        name: name.to_string(),
        origin: Some(origin.to_string()),
        egg_color: Some(color.to_string()),
    }
}

fn time_seeded_index() -> usize {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    nanos as usize
}

/// Ask `source` for a random breed, waiting at most `cfg.timeout`.
///
/// A slow source is abandoned: its worker thread is detached and its eventual
/// answer dropped.
pub fn fetch_breed_or_fallback(
    source: Arc<dyn BreedSource + Send + Sync>,
    cfg: &BreedCfg,
) -> BreedFact {
    let (tx, rx) = xch::bounded(1);
    let spawned = std::thread::Builder::new()
        .name("breed-fetch".into())
        .spawn(move || {
            let res = source.fetch_random().map_err(|e| e.to_string());
            // Receiver may have given up already.
            let _ = tx.send(res);
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not spawn breed fetch; using fallback");
        return fallback();
    }

    match rx.recv_timeout(cfg.timeout) {
        Ok(Ok(Some(breed))) if !breed.name.trim().is_empty() => {
            tracing::debug!(name = %breed.name, "breed from source");
            BreedFact {
                breed,
                origin: BreedOrigin::Source,
            }
        }
        Ok(Ok(_)) => {
            tracing::info!("breed source returned nothing; using fallback");
            fallback()
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "breed source failed; using fallback");
            fallback()
        }
        Err(xch::RecvTimeoutError::Timeout) => {
            tracing::warn!(
                timeout_ms = cfg.timeout.as_millis() as u64,
                "breed source timed out; using fallback"
            );
            fallback()
        }
        Err(xch::RecvTimeoutError::Disconnected) => {
            tracing::warn!("breed worker exited without answering; using fallback");
            fallback()
        }
    }
}

fn fallback() -> BreedFact {
    BreedFact {
        breed: fallback_breed(time_seeded_index()),
        origin: BreedOrigin::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_index_wraps() {
        assert_eq!(fallback_breed(0), fallback_breed(FALLBACK_BREEDS.len()));
        assert_eq!(fallback_breed(0).name, "Leghorn");
    }
}
