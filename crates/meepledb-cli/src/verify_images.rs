//! Image URL verification for stored catalog records.
//!
//! Import-time validation is purely structural; this command is the
//! operational follow-up that HEAD-checks what actually got persisted. The
//! origin CDN rejects requests that do not look like a browser, so checks go
//! out with a browser User-Agent.

use futures::stream::{self, StreamExt};
use reqwest::StatusCode;

const BROWSER_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, sqlx::FromRow)]
struct GameImageCheckRow {
    title: String,
    main_image_url: Option<String>,
    gallery_image_urls: Vec<String>,
}

/// Verify every image URL currently stored on catalog records.
///
/// Logs non-200 URLs for cleanup and prints aggregate totals.
pub(crate) async fn run_verify_images(pool: &sqlx::PgPool, concurrency: usize) -> anyhow::Result<()> {
    let rows = sqlx::query_as::<_, GameImageCheckRow>(
        "SELECT title, main_image_url, gallery_image_urls \
         FROM games \
         WHERE main_image_url IS NOT NULL \
            OR cardinality(gallery_image_urls) > 0",
    )
    .fetch_all(pool)
    .await?;

    let mut targets: Vec<(String, String)> = Vec::new();
    for row in rows {
        if let Some(url) = row.main_image_url {
            targets.push((row.title.clone(), url));
        }
        for url in row.gallery_image_urls {
            targets.push((row.title.clone(), url));
        }
    }

    if targets.is_empty() {
        println!("no image URLs found to verify");
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(12))
        .user_agent(BROWSER_UA)
        .build()?;

    let checks = stream::iter(targets.into_iter().map(|(title, url)| {
        let client = client.clone();
        async move {
            let result = client.head(&url).send().await;
            (title, url, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut ok_count = 0usize;
    let mut bad_count = 0usize;
    for (title, url, result) in checks {
        match result {
            Ok(resp) if resp.status() == StatusCode::OK => {
                ok_count += 1;
            }
            Ok(resp) => {
                bad_count += 1;
                tracing::warn!(
                    game = %title,
                    status = resp.status().as_u16(),
                    url = %url,
                    "image URL verification failed"
                );
            }
            Err(e) => {
                bad_count += 1;
                tracing::warn!(
                    game = %title,
                    error = %e,
                    url = %url,
                    "image URL verification failed"
                );
            }
        }
    }

    println!("verified image URLs: {ok_count} OK, {bad_count} bad");
    Ok(())
}
