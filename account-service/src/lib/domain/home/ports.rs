use crate::domain::home::models::Bundle;
use crate::domain::home::models::Offer;
use crate::domain::home::models::ServiceTile;

/// Source of the home screen's catalog content.
///
/// The content is the same for every user; only the account section of the
/// home screen is personal.
pub trait HomeCatalog: Send + Sync + 'static {
    fn services(&self) -> Vec<ServiceTile>;

    fn offers(&self) -> Vec<Offer>;

    fn bundles(&self) -> Vec<Bundle>;
}
