use crate::error::AppError;
use crate::models::JobPosting;
use crate::traits::{Extractor, Fetcher};
use crate::util::normalize_url;

/// Orchestrates the extraction pipeline: normalize URL → fetch → extract.
///
/// Generic over its external dependencies via traits, enabling dependency
/// injection and testability without real HTTP calls. The service is
/// stateless: each call operates on its own fetched document, and the fetch
/// happens exactly once per request (extraction never re-fetches).
pub struct ExtractService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    fetcher: F,
    extractor: E,
}

impl<F, E> ExtractService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self { fetcher, extractor }
    }

    /// Run the full pipeline for a raw user-supplied URL.
    ///
    /// 1. Normalize and validate the URL (no network on failure).
    /// 2. Fetch the page HTML through the fallback chain.
    /// 3. Extract and validate the job posting from the HTML.
    pub async fn extract(&self, raw_url: &str) -> Result<JobPosting, AppError> {
        let url = normalize_url(raw_url)?;

        tracing::info!("Fetching {}", url);
        let html = self.fetcher.fetch(url.as_str()).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let posting = self.extractor.extract(&url, &html)?;
        tracing::info!(
            company = %posting.company_name,
            chars = posting.job_description.len(),
            degraded = posting.degraded,
            "Extraction complete"
        );

        Ok(posting)
    }
}
