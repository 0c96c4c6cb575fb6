//! Fetch-then-export pipeline.
//!
//! The output format is resolved before any request is sent, and nothing is
//! written unless the whole fetch succeeds.

use crate::error::Result;
use crate::ieee::{FetchOptions, Fetcher, SearchTransport};
use crate::output::{self, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a successful crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub count: usize,
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// Fetch records for `query` and save them to `out_path`.
pub async fn crawl<T: SearchTransport>(
    fetcher: &Fetcher<T>,
    query: &str,
    options: &FetchOptions,
    out_path: &Path,
) -> Result<CrawlSummary> {
    OutputFormat::from_path(out_path)?;

    let records = fetcher.fetch(query, options).await?;
    let format = output::save(&records, out_path)?;

    info!(
        count = records.len(),
        path = %out_path.display(),
        format = ?format,
        "Saved results"
    );

    Ok(CrawlSummary {
        count: records.len(),
        path: out_path.to_path_buf(),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::XploreConfig;
    use crate::error::XploreError;
    use crate::ieee::tests::{options, page, FakeTransport};

    #[tokio::test]
    async fn test_crawl_writes_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("runs/out.csv");
        let fetcher = Fetcher::new(
            FakeTransport::new(vec![Ok(page(0, 3))]),
            XploreConfig::default(),
        );

        let summary = crawl(&fetcher, "q", &options(10), &path).await.expect("crawl");

        assert_eq!(summary.count, 3);
        assert_eq!(summary.format, OutputFormat::Csv);
        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_failure_on_second_page_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.jsonl");
        let fetcher = Fetcher::new(
            FakeTransport::new(vec![
                Ok(page(0, 25)),
                Err(XploreError::Api {
                    code: 502,
                    message: "IEEE search error: 502 Bad Gateway".to_string(),
                }),
            ]),
            XploreConfig::default(),
        );

        let err = crawl(&fetcher, "q", &options(100), &path).await.expect_err("should fail");

        assert!(err.is_transport());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_bad_extension_fails_before_fetching() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let transport = FakeTransport::new(vec![Ok(page(0, 3))]);
        let fetcher = Fetcher::new(transport, XploreConfig::default());

        let err = crawl(&fetcher, "q", &options(10), &path).await.expect_err("should fail");

        assert!(matches!(err, XploreError::Config(_)));
        assert_eq!(fetcher.transport().request_count(), 0);
    }
}
