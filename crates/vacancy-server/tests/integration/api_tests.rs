use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use vacancy_core::error::AppError;
use vacancy_core::testutil::MockFetcher;

use crate::integration::common::{
    INDEED_HTML, TEST_API_KEY, setup_test_app, setup_test_app_with_key,
};

fn extract_request(url: &str) -> Request<Body> {
    let body = serde_json::json!({ "url": url });
    Request::post("/v1/extract-job")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app(MockFetcher::new(INDEED_HTML));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn extract_job_happy_path() {
    let app = setup_test_app(MockFetcher::new(INDEED_HTML));

    let response = app
        .oneshot(extract_request("https://www.indeed.com/viewjob?jk=123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["companyName"], "Acme Corp");
    let description = json["jobDescription"].as_str().unwrap();
    assert!(description.starts_with("We are looking for a senior software engineer"));
    // Whitespace is normalized on the way out.
    assert!(!description.contains('\n'));
}

#[tokio::test]
async fn invalid_url_returns_400_before_fetching() {
    let fetcher = MockFetcher::new(INDEED_HTML);
    let app = setup_test_app(fetcher.clone());

    let response = app.oneshot(extract_request("not a url")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fetcher.calls(), 0);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "invalid_url");
}

#[tokio::test]
async fn fetch_exhaustion_returns_400_with_actionable_message() {
    let app = setup_test_app(MockFetcher::with_error(AppError::FetchExhausted));

    let response = app
        .oneshot(extract_request("https://www.example.com/jobs/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "fetch_failed");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("protected or require authentication"));
    assert!(json.get("jobDescription").is_none());
}

#[tokio::test]
async fn unextractable_page_returns_400() {
    let app = setup_test_app(MockFetcher::new("<html><body><p>Login required.</p></body></html>"));

    let response = app
        .oneshot(extract_request("https://www.example.com/jobs/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "no_valid_description");
}

#[tokio::test]
async fn unauthenticated_request_returns_401_when_key_configured() {
    let app = setup_test_app_with_key(MockFetcher::new(INDEED_HTML), Some(TEST_API_KEY));

    let response = app
        .oneshot(extract_request("https://www.indeed.com/viewjob"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let app = setup_test_app_with_key(MockFetcher::new(INDEED_HTML), Some(TEST_API_KEY));

    let mut request = extract_request("https://www.indeed.com/viewjob");
    request
        .headers_mut()
        .insert("authorization", "Bearer wrong-key".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn correct_api_key_is_accepted() {
    let app = setup_test_app_with_key(MockFetcher::new(INDEED_HTML), Some(TEST_API_KEY));

    let mut request = extract_request("https://www.indeed.com/viewjob");
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {TEST_API_KEY}").parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_stays_public_when_key_configured() {
    let app = setup_test_app_with_key(MockFetcher::new(INDEED_HTML), Some(TEST_API_KEY));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
