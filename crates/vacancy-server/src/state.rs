use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use vacancy_core::error::AppError;
use vacancy_core::models::ExtractionLimits;
use vacancy_core::traits::Fetcher;

/// Object-safe fetcher, so route handlers stay non-generic while tests can
/// still inject a mock.
pub trait DynFetcher: Send + Sync {
    fn fetch_page<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + Send + 'a>>;
}

impl<F: Fetcher> DynFetcher for F {
    fn fetch_page<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + Send + 'a>> {
        Box::pin(self.fetch(url))
    }
}

/// Cloneable [`Fetcher`] handle over a shared [`DynFetcher`].
#[derive(Clone)]
pub struct SharedFetcher(Arc<dyn DynFetcher>);

impl SharedFetcher {
    pub fn new<F: Fetcher + 'static>(fetcher: F) -> Self {
        Self(Arc::new(fetcher))
    }
}

impl Fetcher for SharedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.0.fetch_page(url).await
    }
}

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub fetcher: SharedFetcher,
    /// API key protecting extraction endpoints (None = open access).
    pub api_key: Option<String>,
    pub limits: ExtractionLimits,
}
