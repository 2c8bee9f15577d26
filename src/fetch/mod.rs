//! Loading result-sheet bytes from a local path or an `http(s)` URL.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Returns `true` when `source` should be fetched over HTTP rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Downloads `url` with `client`, failing on any non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Loads a result sheet from a local file path or fetches it over HTTP.
#[tracing::instrument]
pub async fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if is_remote(source) {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source)
            .await
            .with_context(|| format!("Failed to download {source}"))?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("Failed to read {source}"))?
    };
    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::env;
    use std::fs;

    /// Answers every request with a fixed status and body.
    struct StubClient {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClient for StubClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            assert_eq!(req.method(), &reqwest::Method::GET);
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(resp.into())
        }
    }

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://example.com/results.xlsx"));
        assert!(is_remote("https://example.com/results.xlsx"));
        assert!(!is_remote("results.xlsx"));
        assert!(!is_remote("/tmp/http_results.xlsx"));
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let client = StubClient {
            status: 200,
            body: "Course Code,Grade\nCS1013,A\n",
        };

        let bytes = fetch_bytes(&client, "https://example.com/results.csv")
            .await
            .unwrap();
        assert_eq!(bytes, b"Course Code,Grade\nCS1013,A\n");
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_error_status() {
        let client = StubClient {
            status: 404,
            body: "not found",
        };

        let result = fetch_bytes(&client, "https://example.com/missing.xlsx").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_bad_url() {
        let client = StubClient {
            status: 200,
            body: "",
        };

        assert!(fetch_bytes(&client, "not a url").await.is_err());
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let path = temp_path("gpa_rater_test_load.csv");
        fs::write(&path, "Course Code,Grade\nCS1013,A\n").unwrap();

        let bytes = load_source(&path).await.unwrap();
        assert_eq!(bytes, b"Course Code,Grade\nCS1013,A\n");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_names_source() {
        let path = temp_path("gpa_rater_test_missing.xlsx");
        let _ = fs::remove_file(&path);

        let err = load_source(&path).await.unwrap_err();
        assert!(err.to_string().contains("gpa_rater_test_missing.xlsx"));
    }
}
