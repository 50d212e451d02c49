//! JSON output of scraped article lists.
//!
//! Files are organized by local date with an edition name taken from the time
//! of day, so repeated runs on the same day do not overwrite each other unless
//! they fall in the same edition.

use crate::models::Article;
use crate::utils::time_of_day;
use chrono::Local;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `articles` as a JSON array under `json_output_dir`.
///
/// The file is written to `{json_output_dir}/{date}/{time_of_day}.json`; the
/// path is returned.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_articles(
    articles: &[Article],
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let local_date = Local::now().date_naive().to_string();
    write_articles_at(articles, json_output_dir, &local_date, &time_of_day()).await
}

async fn write_articles_at(
    articles: &[Article],
    json_output_dir: &str,
    local_date: &str,
    edition: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;

    let full_json_dir = format!("{}/{}", json_output_dir.trim_end_matches('/'), local_date);
    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{full_json_dir}/{edition}.json");
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, count = articles.len(), "Wrote JSON file");

    Ok(output_json_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_articles_layout_and_content() {
        let dir = std::env::temp_dir().join(format!("news_scraper_json_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();
        let articles = vec![Article::degraded("https://example.com/a", "Anchor headline", "example.com")];

        let path = write_articles_at(&articles, &dir_str, "2026-10-19", "evening")
            .await
            .unwrap();
        assert!(path.ends_with("2026-10-19/evening.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Article> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, articles);
        assert!(written.contains("\"publicationDate\""));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
