use chrono::Utc;

use crate::db::models::{Brand, Dealer, Model, Page};
use crate::db::page_repository::PageRepository;
use crate::db::repository::CatalogRepository;
use crate::error::AppError;

const ABOUT_PAGE: &str = "# About Chaos Escape

Chaos Escape collects the cars worth escaping in. Browse the **brands**,
look up a **model**, or find the closest **dealer**.

| Brand | Country |
|---|---|
| Ferrari | Italy |
| Porsche | Germany |
";

/// (id/url, title, country, visible)
const BRANDS: &[(&str, &str, &str, bool)] = &[
    ("ferrari", "Ferrari", "Italy", true),
    ("lamborghini", "Lamborghini", "Italy", true),
    ("porsche", "Porsche", "Germany", true),
    ("lancia", "Lancia", "Italy", false),
];

/// (brand id, url, title, visible)
const MODELS: &[(&str, &str, &str, bool)] = &[
    ("ferrari", "458", "458", true),
    ("ferrari", "roma", "Roma", true),
    ("ferrari", "sf90-stradale", "SF90 Stradale", true),
    ("ferrari", "f80", "F80", false),
    ("lamborghini", "huracan", "Huracan", true),
    ("lamborghini", "revuelto", "Revuelto", true),
    ("porsche", "911-gt3", "911 GT3", true),
    ("porsche", "taycan", "Taycan", true),
    ("lancia", "delta-integrale", "Delta Integrale", true),
];

/// (url, name, city)
const DEALERS: &[(&str, &str, &str)] = &[
    ("modena-motori", "Modena Motori", "Modena"),
    ("stuttgart-sportwagen", "Stuttgart Sportwagen", "Stuttgart"),
    ("riviera-supercars", "Riviera Supercars", "Nice"),
];

/// Insert the demo catalog, skipping records whose id already exists.
///
/// Returns the number of inserted records.
pub async fn seed_demo_data(
    catalog: &dyn CatalogRepository,
    pages: &dyn PageRepository,
) -> Result<usize, AppError> {
    tracing::info!("Starting demo data seeding...");
    let now = Utc::now();
    let mut inserted = 0;

    for &(id, title, country, visible) in BRANDS {
        if catalog.find_brand_by_id(id).await?.is_some() {
            tracing::info!("Brand '{}' already exists, skipping.", id);
            continue;
        }
        catalog
            .upsert_brand(Brand {
                id: id.to_string(),
                url: id.to_string(),
                title: title.to_string(),
                description: format!("{title} is a car manufacturer from {country}."),
                country_of_origin: country.to_string(),
                logo_icon: Some(id.to_string()),
                seo: None,
                visible,
                updated_at: now,
            })
            .await?;
        inserted += 1;
    }

    for &(brand_id, url, title, visible) in MODELS {
        if catalog.find_model(brand_id, url).await?.is_some() {
            continue;
        }
        catalog
            .upsert_model(Model {
                id: format!("{brand_id}-{url}"),
                url: url.to_string(),
                title: title.to_string(),
                brand_id: brand_id.to_string(),
                description: String::new(),
                visible,
                updated_at: now,
            })
            .await?;
        inserted += 1;
    }

    for &(url, name, city) in DEALERS {
        if catalog.find_dealer_by_url(url).await?.is_some() {
            continue;
        }
        catalog
            .upsert_dealer(Dealer {
                id: url.to_string(),
                url: url.to_string(),
                name: name.to_string(),
                city: Some(city.to_string()),
                description: format!("{name}, your dealer in {city}."),
            })
            .await?;
        inserted += 1;
    }

    if pages.find_by_url("about").await?.is_none() {
        pages
            .upsert(Page {
                id: uuid::Uuid::new_v4().to_string(),
                url: "about".to_string(),
                title: "About".to_string(),
                content: ABOUT_PAGE.to_string(),
                seo: Some("What Chaos Escape is about.".to_string()),
                updated_at: now,
            })
            .await?;
        inserted += 1;
    }

    tracing::info!(inserted, "Demo data seeding completed.");
    Ok(inserted)
}
