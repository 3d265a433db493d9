use serde::Serialize;

use crate::matcher::lookup_tag;
use crate::model::Photo;
use crate::resolver::PhotoSource;

/// Tag carried by the one hand-picked image per category.
pub const FEATURED_TAG: &str = "featured photo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedPhoto {
    pub category: String,
    pub photo: Photo,
}

/// One representative photo per category, in the order the source lists them.
///
/// The category is the leading folder of the photo id; ids without a folder
/// are skipped. A failed fetch yields an empty list.
#[cfg_attr(feature = "trace-spans", tracing::instrument(skip(source)))]
pub async fn featured_photos<S: PhotoSource + Sync>(source: &S) -> Vec<FeaturedPhoto> {
    let tag = lookup_tag(FEATURED_TAG);
    let photos = match source.fetch(&tag).await {
        Ok(photos) => photos,
        Err(e) => {
            tracing::warn!(tag, error = %e, "Featured photo fetch failed");
            return Vec::new();
        }
    };

    let mut featured: Vec<FeaturedPhoto> = Vec::new();
    for photo in photos {
        let Some((folder, _)) = photo.id.split_once('/') else {
            tracing::debug!(id = %photo.id, "Featured photo has no category folder");
            continue;
        };
        let category = folder.trim().to_lowercase();
        if category.is_empty() || featured.iter().any(|f| f.category == category) {
            continue;
        }
        featured.push(FeaturedPhoto { category, photo });
    }
    featured
}
