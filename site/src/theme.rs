//! Light/dark appearance, resolved per request.
//!
//! The server keeps a process-wide preference behind a [`ThemeProvider`]. A
//! request carrying the `Sec-CH-Prefers-Color-Scheme` client hint overrides it
//! for that request only.

use std::str::FromStr;

use axum::http::HeaderMap;
use gallery::Category;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

pub const DARK_BACKGROUND: &str = "#0A0E0C";
pub const DEFAULT_BACKGROUND: &str = "#FCFAF8";
pub const UNKNOWN_CATEGORY_BACKGROUND: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

impl Theme {
    /// Page background for a category key. `None` means a page outside the
    /// galleries.
    pub fn background(self, category: Option<&str>) -> &'static str {
        if self == Theme::Dark {
            return DARK_BACKGROUND;
        }
        match category {
            None => DEFAULT_BACKGROUND,
            Some(key) => match Category::from_key(key) {
                Some(Category::Jrotc) => "#F4F4F2",
                Some(Category::Sports) => "#F0F2F0",
                Some(Category::Landscape) => "#F9F6F2",
                Some(Category::SocialEvents) => "#F7F7F7",
                None => UNKNOWN_CATEGORY_BACKGROUND,
            },
        }
    }
}

/// Source of the ambient color-scheme preference.
pub trait ThemeProvider: Send + Sync {
    fn current(&self) -> Theme;
    /// Dropping the receiver unsubscribes.
    fn subscribe(&self) -> watch::Receiver<Theme>;
}

/// Process-wide preference backed by a `watch` channel. The server only reads
/// it; whoever embeds the router (an admin toggle, a settings reload) calls
/// [`PreferenceWatcher::set`] to change the default for later requests.
#[derive(Debug)]
pub struct PreferenceWatcher {
    tx: watch::Sender<Theme>,
}

impl PreferenceWatcher {
    pub fn new(initial: Theme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        PreferenceWatcher { tx }
    }

    pub fn set(&self, theme: Theme) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == theme {
                false
            } else {
                *current = theme;
                true
            }
        });
        if changed {
            tracing::debug!(?theme, "Color scheme preference changed");
        }
    }
}

impl ThemeProvider for PreferenceWatcher {
    fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }
}

/// Logs every change of the default preference until the provider goes away.
pub fn log_changes(provider: &dyn ThemeProvider) -> JoinHandle<()> {
    let mut rx = provider.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let theme = *rx.borrow_and_update();
            tracing::info!(?theme, "Default color scheme changed");
        }
    })
}

/// Theme for one request: the client hint if it parses, else the provider.
pub fn resolve(headers: &HeaderMap, provider: &dyn ThemeProvider) -> Theme {
    headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim_matches('"').parse().ok())
        .unwrap_or_else(|| provider.current())
}
