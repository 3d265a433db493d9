//! Statically bundled images shipped next to the site.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::matcher::lookup_tag;
use crate::model::{Category, Photo};
use crate::resolver::{PhotoSource, SourceError};

/// URL prefix the bundled images directory is served under.
pub const IMAGES_ROUTE: &str = "/images";

const PREVIEW_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundledPhoto {
    pub category: Category,
    pub photo: Photo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPreview {
    pub category: Category,
    pub name: &'static str,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Default)]
pub struct BundledCatalog {
    root: PathBuf,
    photos: Vec<BundledPhoto>,
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

impl BundledCatalog {
    /// Scan `root` recursively. A missing directory gives an empty catalog.
    #[cfg_attr(feature = "trace-spans", tracing::instrument)]
    pub fn load(root: &Path) -> Result<Self, SourceError> {
        if !root.exists() {
            tracing::warn!(root = %root.display(), "Bundled images directory not found");
            return Ok(BundledCatalog {
                root: root.to_path_buf(),
                photos: Vec::new(),
            });
        }

        let mut relative_paths = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|e| SourceError::Catalog(e.to_string()))?;
            if !entry.file_type().is_file() || !is_jpeg(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| SourceError::Catalog(e.to_string()))?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            relative_paths.push(relative);
        }
        relative_paths.sort();

        let photos = relative_paths
            .into_iter()
            .map(|relative| {
                let url = format!("{}/{}", IMAGES_ROUTE, relative);
                BundledPhoto {
                    category: Self::classify(&relative),
                    photo: Photo::new(relative, url, None, None),
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(root = %root.display(), count = photos.len(), "Loaded bundled catalog");
        Ok(BundledCatalog {
            root: root.to_path_buf(),
            photos,
        })
    }

    /// Keyword classification of a bundled file path.
    pub fn classify(path: &str) -> Category {
        let lower = path.to_lowercase();
        if lower.contains("broward") || lower.contains("raider") || lower.contains("jrotc") {
            Category::Jrotc
        } else if lower.contains("sport") {
            Category::Sports
        } else if lower.contains("landscape") {
            Category::Landscape
        } else {
            Category::SocialEvents
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn photos(&self) -> &[BundledPhoto] {
        &self.photos
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Photo> {
        self.photos
            .iter()
            .filter(move |p| p.category == category)
            .map(|p| &p.photo)
    }

    /// First photos of each non-empty category, in navigation order.
    pub fn previews(&self) -> Vec<CategoryPreview> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryPreview {
                category,
                name: category.display_name(),
                photos: self.in_category(category).take(PREVIEW_SIZE).cloned().collect(),
            })
            .filter(|preview| !preview.photos.is_empty())
            .collect()
    }
}

impl PhotoSource for BundledCatalog {
    async fn fetch(&self, tag: &str) -> Result<Vec<Photo>, SourceError> {
        let category = Category::ALL
            .into_iter()
            .find(|c| lookup_tag(c.slug()) == tag)
            .ok_or_else(|| SourceError::Catalog(format!("No bundled category for tag {}", tag)))?;
        Ok(self.in_category(category).cloned().collect())
    }
}
