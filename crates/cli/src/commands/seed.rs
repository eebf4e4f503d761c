//! Seed the catalog with demo data for local development.
//!
//! Inserts a handful of categories, manufacturers, and products. Every
//! insert is `ON CONFLICT DO NOTHING` keyed on the slug, so re-running the
//! command is safe.

use secrecy::SecretString;
use tracing::info;

use waterlife_admin::db;

/// Demo categories: (slug, name, description).
const CATEGORIES: &[(&str, &str, &str)] = &[
    ("filtration", "Filtration", "Canister, sponge and hang-on-back filters."),
    ("lighting", "Lighting", "LED fixtures for planted and reef tanks."),
    ("water-care", "Water Care", "Conditioners, test kits and supplements."),
];

/// Demo manufacturers: (slug, name, country).
const MANUFACTURERS: &[(&str, &str, &str)] = &[
    ("aquaflow", "AquaFlow", "Germany"),
    ("reefworks", "ReefWorks", "United States"),
];

/// Demo products: (slug, title, description, price, category slug, manufacturer slug).
const PRODUCTS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "aquaflow-canister-450",
        "AquaFlow Canister 450",
        "Quiet external canister filter for tanks up to 450 liters.",
        "189.99",
        "filtration",
        "aquaflow",
    ),
    (
        "reefworks-prime-led",
        "ReefWorks Prime LED",
        "Full-spectrum reef light with programmable sunrise and sunset.",
        "249.00",
        "lighting",
        "reefworks",
    ),
    (
        "crystal-clear-conditioner",
        "Crystal Clear Conditioner",
        "Removes chlorine and chloramine; safe for shrimp.",
        "8.49",
        "water-care",
        "aquaflow",
    ),
];

/// Seed the catalog.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL or any
/// insert fails.
pub async fn catalog() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ADMIN_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let mut inserted = 0_usize;

    for (slug, name, description) in CATEGORIES {
        let result = sqlx::query(
            "INSERT INTO catalog.category (slug, name, description) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(slug)
        .bind(name)
        .bind(description)
        .execute(&pool)
        .await?;
        inserted += usize::try_from(result.rows_affected()).unwrap_or(0);
    }

    for (slug, name, country) in MANUFACTURERS {
        let result = sqlx::query(
            "INSERT INTO catalog.manufacturer (slug, name, country) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(slug)
        .bind(name)
        .bind(country)
        .execute(&pool)
        .await?;
        inserted += usize::try_from(result.rows_affected()).unwrap_or(0);
    }

    for (slug, title, description, price, category, manufacturer) in PRODUCTS {
        let result = sqlx::query(
            "INSERT INTO catalog.product \
             (slug, title, description, price_amount, currency, category_id, manufacturer_id, status) \
             SELECT $1, $2, $3, $4::numeric, 'USD', c.id, m.id, 'active' \
             FROM catalog.category c, catalog.manufacturer m \
             WHERE c.slug = $5 AND m.slug = $6 \
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(slug)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(manufacturer)
        .execute(&pool)
        .await?;
        inserted += usize::try_from(result.rows_affected()).unwrap_or(0);
    }

    info!(inserted, "Seeding complete");
    Ok(())
}
