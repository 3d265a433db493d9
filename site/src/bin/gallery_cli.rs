use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gallery::{featured_photos, BundledCatalog, EventMatchers, GalleryOutcome, GalleryResolver};
use site::config::{AppConfig, AppConfigOverrides};
use site::state::GallerySource;
use site::telemetry::init_tracing;

#[derive(Parser)]
#[command(
    name = "gallery_cli",
    author,
    version,
    about = "Inspect portfolio galleries from the command line"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Override the CDN cloud name
    #[arg(long)]
    cloud_name: Option<String>,
    /// Override the CDN base URL
    #[arg(long)]
    cdn_base_url: Option<String>,
    /// Override the bundled images directory
    #[arg(long)]
    images_dir: Option<PathBuf>,
    /// Photo source for galleries: cdn or bundled
    #[arg(long)]
    photo_source: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a category, optionally narrowed to one event
    Resolve {
        category: String,
        sub_category: Option<String>,
    },
    /// List the featured photo of each category
    Featured,
    /// Show bundled previews per category
    Previews,
    /// Show the lookup tag and listing URL for a category
    Tag { category: String },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = AppConfigOverrides {
        log_level: cli.log_level.clone(),
        cloud_name: cli.cloud_name.clone(),
        cdn_base_url: cli.cdn_base_url.clone(),
        images_dir: cli.images_dir.clone(),
        photo_source: cli.photo_source.clone(),
        ..Default::default()
    };
    let cfg = AppConfig::load_from(cli.config.clone()).apply_overrides(&overrides);
    let _guard = init_tracing(&cfg, "gallery_cli.log");

    let catalog = BundledCatalog::load(&cfg.images_dir)?;
    let resolver = GalleryResolver::new(
        GallerySource::from_config(&cfg, &catalog),
        EventMatchers::new(&cfg.events),
        cfg.default_category.clone(),
    );

    match cli.command {
        Commands::Resolve {
            category,
            sub_category,
        } => {
            let outcome = resolver.resolve(&category, sub_category.as_deref()).await;
            if cli.json {
                return print_json(&outcome);
            }
            match outcome {
                GalleryOutcome::Groups { category, groups } => {
                    println!("Category: {}", category);
                    for group in groups {
                        println!("{} ({} photos)", group.name, group.photos.len());
                        for photo in group.photos {
                            println!("  {} -> {}", photo.title, photo.url);
                        }
                    }
                }
                GalleryOutcome::Empty { category } => {
                    println!("No photos found in {}", category);
                }
                GalleryOutcome::NotFound {
                    category,
                    sub_category,
                } => {
                    println!("No event {} in {}, see /{}", sub_category, category, category);
                }
            }
        }
        Commands::Featured => {
            let featured = featured_photos(resolver.source()).await;
            if cli.json {
                return print_json(&featured);
            }
            if featured.is_empty() {
                println!("No featured photos");
            }
            for f in featured {
                println!("{}: {} -> {}", f.category, f.photo.title, f.photo.url);
            }
        }
        Commands::Previews => {
            let previews = catalog.previews();
            if cli.json {
                return print_json(&previews);
            }
            if previews.is_empty() {
                println!("No bundled images under {}", cfg.images_dir.display());
            }
            for preview in previews {
                println!("{}:", preview.name);
                for photo in preview.photos {
                    println!("  {} -> {}", photo.title, photo.url);
                }
            }
        }
        Commands::Tag { category } => {
            let category = resolver.resolve_category(&category);
            let tag = gallery::matcher::lookup_tag(&category);
            println!("Category: {}", category);
            println!("Lookup tag: {}", tag);
            if let GallerySource::Cdn(client) = resolver.source() {
                println!("Listing URL: {}", client.listing_url(&tag));
            }
        }
    }

    Ok(())
}
