//! Gallery resolver: one category fetch, partitioned into event groups.

use std::future::Future;

use cdn_client::{CdnClient, CdnClientError};
use serde::Serialize;
use thiserror::Error;

use crate::matcher::{lookup_tag, normalize_path, EventMatchers};
use crate::model::{EventGroup, Photo, FALLBACK_GROUP, PLACEHOLDER_CATEGORY};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("CDN Error: {0}")]
    Cdn(#[from] CdnClientError),
    #[error("Catalog Error: {0}")]
    Catalog(String),
}

/// Anything that can list the photos carrying a lookup tag.
pub trait PhotoSource {
    fn fetch(&self, tag: &str) -> impl Future<Output = Result<Vec<Photo>, SourceError>> + Send;
}

impl PhotoSource for CdnClient {
    async fn fetch(&self, tag: &str) -> Result<Vec<Photo>, SourceError> {
        let resources = self.list_by_tag(tag).await?;
        Ok(resources
            .into_iter()
            .map(|r| {
                let url = self.delivery_url(&r.public_id);
                let placeholder = self.blur_url(&r.public_id);
                Photo::new(r.public_id, url, r.width, r.height).with_placeholder(placeholder)
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GalleryOutcome {
    /// At least one non-empty group, in display order.
    Groups {
        category: String,
        groups: Vec<EventGroup>,
    },
    /// Nothing to show. Fetch failures land here too.
    Empty { category: String },
    /// The category has photos but none under the requested sub-category.
    NotFound {
        category: String,
        sub_category: String,
    },
}

impl GalleryOutcome {
    pub fn category(&self) -> &str {
        match self {
            GalleryOutcome::Groups { category, .. }
            | GalleryOutcome::Empty { category }
            | GalleryOutcome::NotFound { category, .. } => category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupKey {
    Event(usize),
    // Declared last so it sorts after every event index.
    Fallback,
}

/// Partition photos into event groups, allow-list order first, fallback last.
pub fn group_photos(photos: Vec<Photo>, matchers: &EventMatchers) -> Vec<EventGroup> {
    let mut buckets: Vec<(GroupKey, EventGroup)> = Vec::new();

    for photo in photos {
        let key = match matchers.classify(&photo.id) {
            Some(index) => GroupKey::Event(index),
            None => GroupKey::Fallback,
        };
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.photos.push(photo),
            None => {
                let name = match key {
                    GroupKey::Event(index) => matchers
                        .get(index)
                        .map(|m| m.name().to_string())
                        .unwrap_or_else(|| FALLBACK_GROUP.to_string()),
                    GroupKey::Fallback => FALLBACK_GROUP.to_string(),
                };
                buckets.push((
                    key,
                    EventGroup {
                        name,
                        photos: vec![photo],
                    },
                ));
            }
        }
    }

    buckets.sort_by_key(|(key, _)| *key);
    buckets.into_iter().map(|(_, group)| group).collect()
}

#[derive(Debug, Clone)]
pub struct GalleryResolver<S> {
    source: S,
    matchers: EventMatchers,
    default_category: String,
}

impl<S: PhotoSource + Sync> GalleryResolver<S> {
    pub fn new(source: S, matchers: EventMatchers, default_category: String) -> Self {
        GalleryResolver {
            source,
            matchers,
            default_category: default_category.trim().to_lowercase(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn matchers(&self) -> &EventMatchers {
        &self.matchers
    }

    /// Normalized category key, with blanks and the placeholder mapped to the default.
    pub fn resolve_category(&self, category: &str) -> String {
        let key = category.trim().to_lowercase();
        if key.is_empty() || key == PLACEHOLDER_CATEGORY {
            self.default_category.clone()
        } else {
            key
        }
    }

    /// Fetch and group a category. Any source failure yields no groups.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub async fn fetch_groups(&self, category: &str) -> Vec<EventGroup> {
        let tag = lookup_tag(category);
        match self.source.fetch(&tag).await {
            Ok(photos) => {
                tracing::info!(category, tag, count = photos.len(), "Fetched gallery photos");
                group_photos(photos, &self.matchers)
            }
            Err(e) => {
                tracing::warn!(category, tag, error = %e, "Gallery fetch failed, showing no photos");
                Vec::new()
            }
        }
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub async fn resolve(&self, category: &str, sub_category: Option<&str>) -> GalleryOutcome {
        let category = self.resolve_category(category);
        let groups = self.fetch_groups(&category).await;

        if groups.is_empty() {
            return GalleryOutcome::Empty { category };
        }

        let sub_category = sub_category.map(str::trim).filter(|s| !s.is_empty());
        let Some(sub_category) = sub_category else {
            return GalleryOutcome::Groups { category, groups };
        };

        let wanted = normalize_path(sub_category);
        let groups: Vec<EventGroup> = groups
            .into_iter()
            .filter(|g| normalize_path(&g.name) == wanted)
            .collect();

        if groups.is_empty() {
            tracing::info!(category, sub_category, "No group matches sub-category");
            GalleryOutcome::NotFound {
                category,
                sub_category: sub_category.to_string(),
            }
        } else {
            GalleryOutcome::Groups { category, groups }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySource {
        by_tag: HashMap<String, Vec<&'static str>>,
        requested: Mutex<Vec<String>>,
    }

    impl MemorySource {
        fn with(tag: &str, ids: Vec<&'static str>) -> Self {
            let mut by_tag = HashMap::new();
            by_tag.insert(tag.to_string(), ids);
            MemorySource {
                by_tag,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl PhotoSource for MemorySource {
        async fn fetch(&self, tag: &str) -> Result<Vec<Photo>, SourceError> {
            self.requested.lock().unwrap().push(tag.to_string());
            match self.by_tag.get(tag) {
                Some(ids) => Ok(ids
                    .iter()
                    .map(|id| Photo::new(id.to_string(), format!("https://cdn/{}", id), None, None))
                    .collect()),
                None => Err(SourceError::Catalog(format!("no tag {}", tag))),
            }
        }
    }

    fn photo(id: &str) -> Photo {
        Photo::new(id.to_string(), format!("https://cdn/{}", id), Some(10), Some(10))
    }

    fn names(groups: &[EventGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_groups_follow_allow_list_order() {
        let photos = vec![
            photo("jrotc/western-comp/a"),
            photo("jrotc/misc/b"),
            photo("jrotc/south_broward/c"),
            photo("jrotc/Western Comp/d"),
        ];
        let groups = group_photos(photos, &EventMatchers::default());
        assert_eq!(names(&groups), vec!["South Broward", "Western Comp", FALLBACK_GROUP]);
        assert_eq!(groups[1].photos.len(), 2);
        assert_eq!(groups[1].photos[0].id, "jrotc/western-comp/a");
        assert_eq!(groups[1].photos[1].id, "jrotc/Western Comp/d");
    }

    #[test]
    fn test_single_match_lands_in_one_group() {
        let groups = group_photos(
            vec![photo("jrotc/open-house-25-26/IMG_1")],
            &EventMatchers::default(),
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Open House 25 26");
        assert_eq!(groups[0].photos[0].id, "jrotc/open-house-25-26/IMG_1");
    }

    #[test]
    fn test_fallback_is_last_even_when_first_seen() {
        let photos = vec![
            photo("jrotc/loose/a"),
            photo("jrotc/raider-county/b"),
            photo("jrotc/south-broward/c"),
        ];
        let groups = group_photos(photos, &EventMatchers::default());
        assert_eq!(
            names(&groups),
            vec!["South Broward", "Raider County", FALLBACK_GROUP]
        );
    }

    #[test]
    fn test_only_fallback() {
        let groups = group_photos(vec![photo("sports/game_1")], &EventMatchers::default());
        assert_eq!(names(&groups), vec![FALLBACK_GROUP]);
    }

    #[test]
    fn test_substring_hazard_is_preserved() {
        let path = "jrotc/raiders-state-comp/raider-county-foo.jpg";

        let groups = group_photos(
            vec![photo(path)],
            &EventMatchers::new(["Raider-County", "Raiders-State-Comp"]),
        );
        assert_eq!(names(&groups), vec!["Raider County"]);

        let groups = group_photos(
            vec![photo(path)],
            &EventMatchers::new(["Raiders-State-Comp", "Raider-County"]),
        );
        assert_eq!(names(&groups), vec!["Raiders State Comp"]);
    }

    #[test]
    fn test_title_collisions_keep_both_photos() {
        let photos = vec![photo("sports/Team_Photo"), photo("sports/team photo")];
        let groups = group_photos(photos, &EventMatchers::default());
        assert_eq!(groups[0].photos.len(), 2);
        assert_eq!(groups[0].photos[0].title, "Team Photo");
        assert_eq!(groups[0].photos[1].title, "team photo");
        assert_ne!(groups[0].photos[0].id, groups[0].photos[1].id);

        let photos = vec![photo("sports/a/Team_Photo"), photo("sports/b/Team Photo")];
        let groups = group_photos(photos, &EventMatchers::default());
        assert_eq!(groups[0].photos[0].title, groups[0].photos[1].title);
        assert_eq!(groups[0].photos.len(), 2);
    }

    #[tokio::test]
    async fn test_placeholder_and_blank_use_default() {
        let source = MemorySource::with("jrotc", vec!["jrotc/western-comp/a"]);
        let resolver = GalleryResolver::new(source, EventMatchers::default(), "JROTC".into());

        for key in ["", "  ", "gallery", "Gallery"] {
            let outcome = resolver.resolve(key, None).await;
            assert_eq!(outcome.category(), "jrotc");
            assert!(matches!(outcome, GalleryOutcome::Groups { .. }));
        }
    }

    #[tokio::test]
    async fn test_lookup_tag_drops_separators() {
        let source = MemorySource::with("socialevents", vec!["social-events/prom/a"]);
        let resolver = GalleryResolver::new(source, EventMatchers::default(), "jrotc".into());

        let outcome = resolver.resolve("Social-Events", None).await;
        assert_eq!(outcome.category(), "social-events");
        assert_eq!(
            resolver.source().requested.lock().unwrap().as_slice(),
            ["socialevents".to_string()]
        );
    }

    #[tokio::test]
    async fn test_source_failure_is_empty() {
        let resolver =
            GalleryResolver::new(MemorySource::default(), EventMatchers::default(), "jrotc".into());
        let outcome = resolver.resolve("sports", None).await;
        assert_eq!(
            outcome,
            GalleryOutcome::Empty {
                category: "sports".into()
            }
        );
    }

    #[tokio::test]
    async fn test_sub_category_filter() {
        let source = MemorySource::with(
            "jrotc",
            vec!["jrotc/raider-county/a", "jrotc/western-comp/b", "jrotc/misc/c"],
        );
        let resolver = GalleryResolver::new(source, EventMatchers::default(), "jrotc".into());

        match resolver.resolve("jrotc", Some("Western_Comp")).await {
            GalleryOutcome::Groups { groups, .. } => {
                assert_eq!(names(&groups), vec!["Western Comp"]);
                assert_eq!(groups[0].photos.len(), 1);
            }
            other => panic!("expected groups, got {:?}", other),
        }

        match resolver.resolve("jrotc", Some("recent-uploads")).await {
            GalleryOutcome::Groups { groups, .. } => {
                assert_eq!(names(&groups), vec![FALLBACK_GROUP])
            }
            other => panic!("expected groups, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_sub_category_is_not_found() {
        let source = MemorySource::with("jrotc", vec!["jrotc/raider-county/a"]);
        let resolver = GalleryResolver::new(source, EventMatchers::default(), "jrotc".into());

        let outcome = resolver.resolve("jrotc", Some("western-comp")).await;
        assert_eq!(
            outcome,
            GalleryOutcome::NotFound {
                category: "jrotc".into(),
                sub_category: "western-comp".into()
            }
        );
    }

    #[tokio::test]
    async fn test_blank_sub_category_is_ignored() {
        let source = MemorySource::with("jrotc", vec!["jrotc/raider-county/a"]);
        let resolver = GalleryResolver::new(source, EventMatchers::default(), "jrotc".into());
        let outcome = resolver.resolve("jrotc", Some("  ")).await;
        assert!(matches!(outcome, GalleryOutcome::Groups { .. }));
    }
}
