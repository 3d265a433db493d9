//! Gallery data shaping: photos, event groups and where they come from.

pub mod catalog;
pub mod featured;
pub mod matcher;
pub mod model;
pub mod resolver;

pub use catalog::{BundledCatalog, BundledPhoto, CategoryPreview};
pub use featured::{featured_photos, FeaturedPhoto, FEATURED_TAG};
pub use matcher::{EventMatcher, EventMatchers, DEFAULT_EVENTS};
pub use model::{Category, EventGroup, Photo, FALLBACK_GROUP, PLACEHOLDER_CATEGORY};
pub use resolver::{group_photos, GalleryOutcome, GalleryResolver, PhotoSource, SourceError};
