//! Run the catalog import pipeline from a terminal, against the same
//! configured services the server uses.

use clap::Args;
use rust_decimal::Decimal;
use uuid::Uuid;

use meepledb_core::{ImportRequest, SaleCondition};
use meepledb_extractor::ExtractionClient;
use meepledb_import::run_import;
use meepledb_scraper::ScrapeClient;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// Catalog page URL to import.
    pub url: String,
    /// Mark the record as coming soon.
    #[arg(long)]
    pub coming_soon: bool,
    /// List the copy for sale.
    #[arg(long)]
    pub for_sale: bool,
    /// Sale price, e.g. 35.00.
    #[arg(long)]
    pub price: Option<Decimal>,
    /// Sale condition: New, Like New, Good, Fair, or Poor.
    #[arg(long)]
    pub condition: Option<String>,
    /// Import as an expansion.
    #[arg(long)]
    pub expansion: bool,
    /// Public id of the parent game when importing an expansion.
    #[arg(long)]
    pub parent_id: Option<Uuid>,
    /// Room the copy lives in.
    #[arg(long)]
    pub room: Option<String>,
    /// Shelf the copy lives on.
    #[arg(long)]
    pub shelf: Option<String>,
}

pub(crate) async fn run_import_command(args: &ImportArgs) -> anyhow::Result<()> {
    let config = meepledb_core::load_app_config()?;

    let sale_condition = match &args.condition {
        Some(raw) => Some(SaleCondition::parse(raw).ok_or_else(|| {
            anyhow::anyhow!(
                "invalid condition \"{raw}\"; expected one of: New, Like New, Good, Fair, Poor"
            )
        })?),
        None => None,
    };

    let pool_config = meepledb_db::PoolConfig::from_app_config(&config);
    let pool = meepledb_db::connect_pool(&config.database_url, pool_config).await?;
    meepledb_db::run_migrations(&pool).await?;

    let scrape_key = config
        .scrape_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("MEEPLEDB_SCRAPE_API_KEY is required"))?;
    let extractor_key = config
        .extractor_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("MEEPLEDB_EXTRACTOR_API_KEY is required"))?;

    let scraper = ScrapeClient::with_base_url(
        &scrape_key,
        config.scrape_timeout_secs,
        &config.scrape_api_url,
    )?;
    let extractor = ExtractionClient::with_base_url(
        &extractor_key,
        &config.extractor_model,
        config.extractor_timeout_secs,
        &config.extractor_api_url,
    )?;

    let request = ImportRequest {
        url: args.url.clone(),
        is_coming_soon: args.coming_soon,
        is_for_sale: args.for_sale,
        sale_price: args.price,
        sale_condition,
        is_expansion: args.expansion,
        parent_game_id: args.parent_id,
        location_room: args.room.clone(),
        location_shelf: args.shelf.clone(),
    };

    let imported = run_import(&pool, &scraper, &extractor, &request).await?;

    println!(
        "imported \"{}\" ({}) as {}",
        imported.game.title,
        imported.game.difficulty,
        imported.game.public_id
    );
    if let Some(publisher) = &imported.publisher {
        println!("  publisher: {publisher}");
    }
    if !imported.mechanics.is_empty() {
        println!("  mechanics: {}", imported.mechanics.join(", "));
    }
    if let Some(main) = &imported.game.main_image_url {
        println!("  main image: {main}");
    }
    for url in &imported.game.gallery_image_urls {
        println!("  gallery image: {url}");
    }

    Ok(())
}
