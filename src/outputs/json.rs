//! JSON output for session reports and word clouds.
//!
//! # Output Structure
//!
//! Files are organized by date, one pair per analysed article:
//! ```text
//! output_dir/
//! └── 2025-05-06/
//!     ├── www-bbc-com-news-world-123.json        # SessionReport
//!     └── www-bbc-com-news-world-123.cloud.json  # WordCloudSpec
//! ```

use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Directory for a given date under `output_dir`, created if needed.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, %local_date))]
pub async fn date_dir(output_dir: &str, local_date: &str) -> Result<PathBuf, Box<dyn Error>> {
    let dir = Path::new(output_dir).join(local_date);
    info!(dir = %dir.display(), "Ensuring output directory exists");
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(dir = %dir.display(), error = %e, "Failed to create output dir");
        return Err(e.into());
    }
    Ok(dir)
}

/// Serialize `value` as pretty JSON into `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).await?;
    info!("Wrote JSON file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightedWord;

    #[tokio::test]
    async fn test_write_json_into_date_dir() {
        let root = std::env::temp_dir().join(format!("news_taster_json_{}", std::process::id()));
        let root_str = root.to_string_lossy().to_string();

        let dir = date_dir(&root_str, "2025-05-06").await.unwrap();
        assert!(dir.ends_with("2025-05-06"));

        let path = dir.join("words.json");
        let words = vec![WeightedWord {
            text: "storm".to_string(),
            weight: 3,
        }];
        write_json(&words, &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let back: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(back[0]["text"], "storm");
        assert_eq!(back[0]["weight"], 3);

        let _ = std::fs::remove_dir_all(&root);
    }
}
