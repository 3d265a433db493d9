use std::sync::Arc;
use std::time::Duration;

use cdn_client::CdnClient;
use gallery::{BundledCatalog, EventMatchers, GalleryResolver, Photo, PhotoSource, SourceError};
use notify::{BookingDesk, ContactDesk, EmailRelay, EmailRelayConfig, FormRelay};

use crate::carousel::Rotation;
use crate::config::AppConfig;
use crate::theme::{PreferenceWatcher, Theme, ThemeProvider};

/// Where gallery photos come from, picked by `photo_source` in the config.
#[derive(Debug, Clone)]
pub enum GallerySource {
    Cdn(CdnClient),
    Bundled(BundledCatalog),
}

impl GallerySource {
    pub fn from_config(cfg: &AppConfig, catalog: &BundledCatalog) -> Self {
        match cfg.photo_source.trim().to_lowercase().as_str() {
            "bundled" => GallerySource::Bundled(catalog.clone()),
            other => {
                if other != "cdn" {
                    tracing::warn!(photo_source = other, "Unknown photo source, using the CDN");
                }
                GallerySource::Cdn(
                    CdnClient::with_base_url(cfg.cloud_name.clone(), cfg.cdn_base_url.clone())
                        .with_delivery_base(cfg.delivery_base_url.clone()),
                )
            }
        }
    }
}

impl PhotoSource for GallerySource {
    async fn fetch(&self, tag: &str) -> Result<Vec<Photo>, SourceError> {
        match self {
            GallerySource::Cdn(client) => client.fetch(tag).await,
            GallerySource::Bundled(catalog) => catalog.fetch(tag).await,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub resolver: GalleryResolver<GallerySource>,
    pub catalog: BundledCatalog,
    pub contact: ContactDesk<EmailRelay>,
    pub booking: BookingDesk<FormRelay>,
    pub theme: Arc<dyn ThemeProvider>,
    pub rotation: Rotation,
}

impl AppState {
    /// Builds the shared state and starts the carousel. Needs a running runtime.
    pub fn new(config: AppConfig) -> Arc<Self> {
        let initial = config.theme.parse::<Theme>().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to the light theme");
            Theme::Light
        });
        Self::with_theme_provider(config, Arc::new(PreferenceWatcher::new(initial)))
    }

    pub fn with_theme_provider(config: AppConfig, theme: Arc<dyn ThemeProvider>) -> Arc<Self> {
        let catalog = BundledCatalog::load(&config.images_dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Bundled catalog unavailable");
            BundledCatalog::default()
        });

        let source = GallerySource::from_config(&config, &catalog);
        let resolver = GalleryResolver::new(
            source,
            EventMatchers::new(&config.events),
            config.default_category.clone(),
        );

        let cooldown = Duration::from_secs(config.contact_cooldown_secs);
        let contact = ContactDesk::new(
            EmailRelay::new(EmailRelayConfig {
                base_url: config.email_relay_url.clone(),
                service_id: config.email_service_id.clone(),
                notify_template: config.email_notify_template.clone(),
                reply_template: config.email_reply_template.clone(),
                public_key: config.email_public_key.clone(),
            }),
            config.owner_email.clone(),
            config.owner_name.clone(),
            cooldown,
        );
        let booking = BookingDesk::new(
            FormRelay::new(config.form_relay_url.clone()),
            config.owner_email.clone(),
            cooldown,
        );

        let rotation = Rotation::start(Duration::from_secs(config.carousel_period_secs));

        Arc::new(AppState {
            config,
            resolver,
            catalog,
            contact,
            booking,
            theme,
            rotation,
        })
    }
}
