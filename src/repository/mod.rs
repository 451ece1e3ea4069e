//! Hero data module
//!
//! Holds the hero record type, the read contract the API handlers depend on,
//! and the static catalog that backs the service.

mod hero;
mod memory;

pub use hero::Hero;
pub use memory::StaticHeroRepository;

/// Read-only access to the hero catalog
///
/// Pages are numbered from 1. Implementations must be immutable once built
/// so a single instance can be shared across connection tasks.
pub trait HeroRepository: Send + Sync {
    /// Number of pages in the catalog
    fn page_count(&self) -> i32;

    /// Heroes on the given page, `None` when the page does not exist
    fn page(&self, page: i32) -> Option<&[Hero]>;

    /// Heroes whose name contains `query`, ignoring case
    ///
    /// An empty query matches nothing.
    fn search(&self, query: &str) -> Vec<Hero>;
}
