use std::sync::Arc;

use axum::Router;

use vacancy_core::models::ExtractionLimits;
use vacancy_core::testutil::MockFetcher;
use vacancy_server::routes;
use vacancy_server::state::{AppState, SharedFetcher};

pub const TEST_API_KEY: &str = "test-secret-key";

/// A fetched Indeed posting with a valid description and a company name.
pub const INDEED_HTML: &str = r#"<html><body>
    <div class="jobsearch-InlineCompanyRating"><div>Acme Corp</div></div>
    <div id="jobDescriptionText">We are looking for a senior software engineer to join our
    platform team. You will design, build, and operate distributed systems that serve
    millions of users. Experience with Rust, databases, and cloud infrastructure is a plus.
    We offer competitive compensation and a supportive environment. Apply today!</div>
</body></html>"#;

/// Build the app with an injected mock fetcher and no API key (open access).
pub fn setup_test_app(fetcher: MockFetcher) -> Router {
    setup_test_app_with_key(fetcher, None)
}

/// Build the app with an injected mock fetcher and an optional API key.
pub fn setup_test_app_with_key(fetcher: MockFetcher, api_key: Option<&str>) -> Router {
    let state = Arc::new(AppState {
        fetcher: SharedFetcher::new(fetcher),
        api_key: api_key.map(str::to_string),
        limits: ExtractionLimits::default(),
    });
    routes::router(state)
}
