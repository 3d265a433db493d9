//! JSON view models returned by the page routes.

use gallery::{Category, CategoryPreview, EventGroup, FeaturedPhoto, GalleryOutcome};
use notify::ContactSubject;
use serde::Serialize;

use crate::theme::Theme;

pub const SITE_NAME: &str = "Arthuro Visuals";
pub const CONTACT_EMAIL: &str = "arthurovisuals@email.com";
pub const INSTAGRAM: &str = "@arthur0_2025";
pub const LOCATION: &str = "South Florida / Available for Travel";
pub const PROFILE_IMAGE: &str = "/images/Profile_Picture.JPG";
pub const EMPTY_MESSAGE: &str = "No photos found in this specific collection yet.";

#[derive(Debug, Clone, Serialize)]
pub struct Appearance {
    pub theme: Theme,
    pub background: &'static str,
}

impl Appearance {
    pub fn new(theme: Theme, category: Option<&str>) -> Self {
        Appearance {
            theme,
            background: theme.background(category),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    pub slug: &'static str,
    pub name: &'static str,
    pub href: String,
}

pub fn navigation() -> Vec<NavEntry> {
    Category::ALL
        .iter()
        .map(|c| NavEntry {
            slug: c.slug(),
            name: c.display_name(),
            href: format!("/{}", c.slug()),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub site: &'static str,
    pub appearance: Appearance,
    pub categories: Vec<NavEntry>,
    pub featured: Vec<FeaturedPhoto>,
    /// Index into `featured` of the slide currently shown.
    pub hero_index: Option<usize>,
    pub previews: Vec<CategoryPreview>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub site: &'static str,
    pub appearance: Appearance,
    pub profile_image: &'static str,
    pub location: &'static str,
    pub stats: Vec<Stat>,
    pub specialties: Vec<&'static str>,
}

impl AboutView {
    pub fn new(appearance: Appearance) -> Self {
        AboutView {
            site: SITE_NAME,
            appearance,
            profile_image: PROFILE_IMAGE,
            location: LOCATION,
            stats: vec![
                Stat { value: "2+", label: "Years Experience" },
                Stat { value: "15+", label: "Events Captured" },
                Stat { value: "5k+", label: "Moments Delivered" },
            ],
            specialties: Category::ALL.iter().map(|c| c.display_name()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub appearance: Appearance,
    pub email: &'static str,
    pub instagram: &'static str,
    pub location: &'static str,
    pub subjects: Vec<&'static str>,
    pub cooldown_secs: u64,
}

impl ContactView {
    pub fn new(appearance: Appearance, cooldown_secs: u64) -> Self {
        ContactView {
            appearance,
            email: CONTACT_EMAIL,
            instagram: INSTAGRAM,
            location: LOCATION,
            subjects: ContactSubject::ALL.iter().map(|s| s.label()).collect(),
            cooldown_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub appearance: Appearance,
    /// Small heading above the title: the category on sub-category pages.
    pub eyebrow: String,
    pub title: String,
    pub category: String,
    pub groups: Vec<EventGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

fn spaced(key: &str) -> String {
    key.replace('-', " ")
}

impl GalleryView {
    /// Builds the page for a resolved gallery. `NotFound` never reaches here.
    pub fn new(theme: Theme, outcome: GalleryOutcome, sub_category: Option<&str>) -> Self {
        let category = outcome.category().to_string();
        let sub_category = sub_category.map(str::trim).filter(|s| !s.is_empty());
        let (eyebrow, title) = match sub_category {
            Some(sub) => (spaced(&category), spaced(sub)),
            None => ("Collection".to_string(), spaced(&category)),
        };
        let (groups, message) = match outcome {
            GalleryOutcome::Groups { groups, .. } => (groups, None),
            _ => (Vec::new(), Some(EMPTY_MESSAGE)),
        };
        GalleryView {
            appearance: Appearance::new(theme, Some(&category)),
            eyebrow,
            title,
            category,
            groups,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RedirectView {
    pub status: &'static str,
    pub category: String,
    pub sub_category: String,
    pub redirect_to: String,
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub status: &'static str,
    pub message: &'static str,
}
