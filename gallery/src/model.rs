use serde::Serialize;

/// Name of the group collecting images that match no known event.
pub const FALLBACK_GROUP: &str = "Recent Uploads";

/// Generic category key that stands in for "whatever the default is".
pub const PLACEHOLDER_CATEGORY: &str = "gallery";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Low-resolution stand-in shown while `url` loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Photo {
    pub fn new(id: String, url: String, width: Option<u32>, height: Option<u32>) -> Self {
        let title = title_from_path(&id);
        Photo {
            id,
            title,
            url,
            width,
            height,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: String) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Display title: last path segment, extension dropped, underscores as spaces.
pub fn title_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };
    stem.replace('_', " ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventGroup {
    pub name: String,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Jrotc,
    Sports,
    SocialEvents,
    Landscape,
}

impl Category {
    /// Navigation and preview order.
    pub const ALL: [Category; 4] = [
        Category::Jrotc,
        Category::Sports,
        Category::SocialEvents,
        Category::Landscape,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Jrotc => "jrotc",
            Category::Sports => "sports",
            Category::SocialEvents => "social-events",
            Category::Landscape => "landscape",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Jrotc => "JROTC",
            Category::Sports => "Sports",
            Category::SocialEvents => "Social Events",
            Category::Landscape => "Landscape",
        }
    }

    /// Look a category up by any separator spelling of its slug.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = crate::matcher::normalize_path(key.trim());
        Category::ALL.into_iter().find(|c| c.slug() == key)
    }
}
