use std::future::Future;

use url::Url;

use crate::error::AppError;
use crate::models::JobPosting;

/// Fetches raw HTML content from a URL.
///
/// Implementations own their retry/fallback behavior; callers see a single
/// attempt that either yields plausible HTML or fails terminally.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Extracts a job posting from already-fetched HTML.
///
/// Purely computational: implementations must not perform network calls, so
/// a fetch failure can never be retried from inside extraction.
pub trait Extractor: Send + Sync + Clone {
    fn extract(&self, url: &Url, html: &str) -> Result<JobPosting, AppError>;
}
