//! Sequential composition of the import stages.

use sqlx::PgPool;

use meepledb_core::ImportRequest;
use meepledb_db::{
    find_or_create_mechanic, find_or_create_publisher, get_game_id_by_public_id,
    get_publisher_name, list_game_mechanic_names, upsert_game_with_links, GameRow, GameUpsert,
};
use meepledb_scraper::{
    ensure_content_matches, extract_candidates, sanitize_images, validate_source_url, ScrapeClient,
};

use crate::error::ImportError;
use crate::extract::StructuredExtract;

/// The persisted record plus its resolved relation names, as returned to the
/// administrator who triggered the import.
#[derive(Debug, Clone)]
pub struct ImportedGame {
    pub game: GameRow,
    pub mechanics: Vec<String>,
    pub publisher: Option<String>,
}

/// Runs one import to completion.
///
/// Stages execute strictly forward — guardrail, scrape, image candidates,
/// content match, structured extraction, entity resolution, image
/// sanitization, upsert — and any failure short-circuits with a typed
/// [`ImportError`]. Re-running with the same source URL updates the existing
/// record in place.
///
/// # Errors
///
/// Returns the failing stage's [`ImportError`] variant; see the error
/// taxonomy for which stage produces which.
pub async fn run_import<E: StructuredExtract>(
    pool: &PgPool,
    scraper: &ScrapeClient,
    extractor: &E,
    request: &ImportRequest,
) -> Result<ImportedGame, ImportError> {
    let url = validate_source_url(&request.url)?;

    tracing::info!(url = %url, "starting catalog import");
    let scrape = scraper.scrape(url.as_str()).await?;

    let candidates = extract_candidates(&scrape.raw_html);
    tracing::debug!(candidate_count = candidates.len(), "image candidates extracted");

    ensure_content_matches(&url, &scrape.markdown)?;

    let candidate_urls: Vec<String> = candidates.iter().map(|c| c.url.clone()).collect();
    let extracted = extractor.extract(&scrape.markdown, &candidate_urls).await?;
    tracing::info!(title = %extracted.title, "structured record extracted");

    let mut mechanic_ids = Vec::with_capacity(extracted.mechanics.len());
    for name in &extracted.mechanics {
        mechanic_ids.push(find_or_create_mechanic(pool, name).await?);
    }

    let publisher_id = match &extracted.publisher {
        Some(name) => Some(find_or_create_publisher(pool, name).await?),
        None => None,
    };

    let images = sanitize_images(
        extracted.main_image.as_deref(),
        &extracted.gameplay_images,
        &candidates,
    );

    let parent_game_id = match request.parent_game_id.filter(|_| request.is_expansion) {
        Some(public_id) => {
            let id = get_game_id_by_public_id(pool, public_id).await?;
            if id.is_none() {
                tracing::warn!(parent_public_id = %public_id, "parent game not found, importing without linkage");
            }
            id
        }
        None => None,
    };

    // The extractor's canonical URL wins as the upsert key when present;
    // otherwise the record is keyed on the URL the administrator submitted.
    let source_url = extracted
        .bgg_url
        .clone()
        .unwrap_or_else(|| request.url.clone());

    let upsert = GameUpsert {
        title: extracted.title.clone(),
        description: extracted.description.clone(),
        difficulty: extracted.difficulty.as_str().to_owned(),
        play_time: extracted.play_time.as_str().to_owned(),
        game_type: extracted.game_type.as_str().to_owned(),
        min_players: extracted.min_players,
        max_players: extracted.max_players,
        suggested_age: extracted.suggested_age.clone(),
        publisher_id,
        main_image_url: images.main,
        gallery_image_urls: images.gallery,
        source_url,
        is_coming_soon: request.is_coming_soon,
        is_for_sale: request.is_for_sale,
        sale_price: request.sale_price,
        sale_condition: request.sale_condition.map(|c| c.as_str().to_owned()),
        is_expansion: request.is_expansion,
        parent_game_id,
        location_room: request.location_room.clone(),
        location_shelf: request.location_shelf.clone(),
    };

    let game = upsert_game_with_links(pool, &upsert, &mechanic_ids).await?;
    let mechanics = list_game_mechanic_names(pool, game.id).await?;
    let publisher = get_publisher_name(pool, game.publisher_id).await?;

    tracing::info!(game_id = game.id, title = %game.title, "catalog import complete");
    Ok(ImportedGame {
        game,
        mechanics,
        publisher,
    })
}
