//! Discovery strategy implementations.
//!
//! - `seeds` - one seed artist per seed genre (feeds `related`)
//! - `enumeration` - the catalog's advertised genre seeds
//! - `keyword` - track search per genre keyword
//! - `related` - bounded related-artist graph exploration

pub mod enumeration;
pub mod keyword;
pub mod related;
pub mod seeds;

pub use enumeration::GenreSeedEnumeration;
pub use keyword::KeywordExpansion;
pub use related::RelatedArtistExplorer;
pub use seeds::SeedDiscovery;
