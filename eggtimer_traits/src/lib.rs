pub mod clock;

pub use clock::{Clock, MonotonicClock, WallClock};

/// Local notification service that fires a completion alert at a future instant.
pub trait Notifier {
    fn schedule_completion(
        &mut self,
        after: std::time::Duration,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn cancel_all_pending(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn clear_badge_count(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn request_permission(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// One record from a poultry breed catalog. Decorative only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breed {
    pub name: String,
    pub origin: Option<String>,
    pub egg_color: Option<String>,
}

/// Source of random breed records (remote catalog, local file, ...).
pub trait BreedSource {
    /// `Ok(None)` means the catalog answered but had nothing to offer.
    fn fetch_random(&self) -> Result<Option<Breed>, Box<dyn std::error::Error + Send + Sync>>;
}
