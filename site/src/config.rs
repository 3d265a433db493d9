use std::path::PathBuf;

use gallery::DEFAULT_EVENTS;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "PORTFOLIO";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub bind_addr: String,
    pub log_dir: PathBuf,
    pub debug_console: bool,
    /// `cdn` or `bundled`.
    pub photo_source: String,
    pub cloud_name: String,
    pub cdn_base_url: String,
    pub delivery_base_url: String,
    pub default_category: String,
    pub events: Vec<String>,
    pub images_dir: PathBuf,
    pub theme: String,
    pub redirect_delay_secs: u64,
    pub contact_cooldown_secs: u64,
    pub carousel_period_secs: u64,
    pub email_relay_url: String,
    pub email_service_id: String,
    pub email_notify_template: String,
    pub email_reply_template: String,
    pub email_public_key: String,
    pub owner_email: String,
    pub owner_name: String,
    pub form_relay_url: String,
}

#[derive(Default)]
pub struct AppConfigOverrides {
    pub log_level: Option<String>,
    pub bind_addr: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub photo_source: Option<String>,
    pub cloud_name: Option<String>,
    pub cdn_base_url: Option<String>,
    pub images_dir: Option<PathBuf>,
    pub theme: Option<String>,
    pub debug_console: bool,
}

pub fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".arthuro-visuals")
}

fn default_config_path() -> PathBuf {
    base_dir().join("config.toml")
}

impl AppConfig {
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(default_config_path);
        let builder = config::Config::builder()
            .add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX));
        let cfg = builder.build().unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
            config::Config::default()
        });

        let string = |key: &str, default: &str| {
            cfg.get_string(key).unwrap_or_else(|_| default.to_string())
        };
        let secs = |key: &str, default: u64| {
            cfg.get_int(key)
                .ok()
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(default)
        };

        let cdn_base_url = string("cdn_base_url", cdn_client::DEFAULT_BASE_URL);
        let events = cfg
            .get_array("events")
            .ok()
            .map(|values| {
                values
                    .into_iter()
                    .filter_map(|v| v.into_string().ok())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| DEFAULT_EVENTS.iter().map(|e| e.to_string()).collect());

        Self {
            log_level: string("log_level", "info"),
            bind_addr: string("bind_addr", "0.0.0.0:8080"),
            log_dir: cfg
                .get_string("log_dir")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base_dir().join("logs")),
            debug_console: cfg.get_bool("debug_console").unwrap_or(false),
            photo_source: string("photo_source", "cdn"),
            cloud_name: string("cloud_name", "demo"),
            delivery_base_url: string("delivery_base_url", &cdn_base_url),
            cdn_base_url,
            default_category: string("default_category", "jrotc"),
            events,
            images_dir: cfg
                .get_string("images_dir")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public").join("images")),
            theme: string("theme", "light"),
            redirect_delay_secs: secs("redirect_delay_secs", 3),
            contact_cooldown_secs: secs("contact_cooldown_secs", 30),
            carousel_period_secs: secs("carousel_period_secs", 5),
            email_relay_url: string("email_relay_url", notify::email::DEFAULT_EMAIL_RELAY_URL),
            email_service_id: string("email_service_id", ""),
            email_notify_template: string("email_notify_template", ""),
            email_reply_template: string("email_reply_template", ""),
            email_public_key: string("email_public_key", ""),
            owner_email: string("owner_email", "arthurovisuals@email.com"),
            owner_name: string("owner_name", "Arthuro Visuals"),
            form_relay_url: string("form_relay_url", "https://formspree.io/f/booking"),
        }
    }

    pub fn apply_overrides(mut self, ov: &AppConfigOverrides) -> Self {
        if let Some(l) = &ov.log_level {
            self.log_level = l.clone();
        }
        if let Some(b) = &ov.bind_addr {
            self.bind_addr = b.clone();
        }
        if let Some(d) = &ov.log_dir {
            self.log_dir = d.clone();
        }
        if let Some(s) = &ov.photo_source {
            self.photo_source = s.clone();
        }
        if let Some(c) = &ov.cloud_name {
            self.cloud_name = c.clone();
        }
        if let Some(u) = &ov.cdn_base_url {
            // Delivery follows the listing host unless it was set on its own.
            if self.delivery_base_url == self.cdn_base_url {
                self.delivery_base_url = u.clone();
            }
            self.cdn_base_url = u.clone();
        }
        if let Some(i) = &ov.images_dir {
            self.images_dir = i.clone();
        }
        if let Some(t) = &ov.theme {
            self.theme = t.clone();
        }
        if ov.debug_console {
            self.debug_console = true;
        }
        self
    }

    pub fn save_to(&self, path: Option<PathBuf>) -> std::io::Result<()> {
        let path = path.unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}
