use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue, PRAGMA, REFERER,
    USER_AGENT,
};
use reqwest::{Client, redirect};
use url::Url;

use vacancy_core::error::AppError;
use vacancy_core::traits::Fetcher;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// One concrete way of retrieving a page's HTML.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Plain GET against the target URL with same-origin fetch metadata.
    Direct { timeout: Duration },
    /// GET through a public relay that mirrors the target page's body.
    /// `build` maps the target URL to the relay request URL.
    Proxy {
        name: &'static str,
        build: fn(&str) -> String,
        timeout: Duration,
    },
    /// POST with an empty form body; defeats a subset of request-method-based
    /// anti-bot filters.
    PostForm { timeout: Duration },
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Direct { .. } => "direct",
            Strategy::Proxy { name, .. } => name,
            Strategy::PostForm { .. } => "post-form",
        }
    }

    fn timeout(&self) -> Duration {
        match self {
            Strategy::Direct { timeout }
            | Strategy::Proxy { timeout, .. }
            | Strategy::PostForm { timeout } => *timeout,
        }
    }
}

/// The production strategy chain, in priority order.
pub fn default_strategies() -> Vec<Strategy> {
    vec![
        Strategy::Direct {
            timeout: DEFAULT_TIMEOUT,
        },
        Strategy::Proxy {
            name: "corsproxy.io",
            build: |url| format!("https://corsproxy.io/?{}", encode(url)),
            timeout: DEFAULT_TIMEOUT,
        },
        Strategy::Proxy {
            name: "allorigins",
            build: |url| format!("https://api.allorigins.win/raw?url={}", encode(url)),
            timeout: DEFAULT_TIMEOUT,
        },
        Strategy::Proxy {
            name: "thingproxy",
            build: |url| format!("https://thingproxy.freeboard.io/fetch/{url}"),
            timeout: DEFAULT_TIMEOUT,
        },
        // Best effort: this relay may require its own authorization.
        Strategy::Proxy {
            name: "cors-anywhere",
            build: |url| format!("https://cors-anywhere.herokuapp.com/{url}"),
            timeout: Duration::from_secs(20),
        },
        Strategy::PostForm {
            timeout: DEFAULT_TIMEOUT,
        },
    ]
}

/// Percent-encode a URL for embedding as a single query component.
///
/// `byte_serialize` emits `+` for spaces (form encoding) and `%2B` for a
/// literal `+`, so rewriting `+` to `%20` afterwards yields plain percent
/// encoding, which is what the relays expect.
fn encode(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// HTTP fetcher with an ordered fallback chain of retrieval strategies.
///
/// Strategies are tried strictly sequentially, each exactly once, stopping at
/// the first one whose response passes [`is_plausible_html`]. Per-strategy
/// failures are logged and absorbed; only total exhaustion surfaces, as
/// [`AppError::FetchExhausted`].
///
/// By default, SSRF protection is **enabled**: requests to private/reserved
/// IP ranges are blocked. Use [`allow_private_urls`](Self::allow_private_urls)
/// to disable this (e.g., for CLI usage where the user controls the machine).
#[derive(Clone)]
pub struct FallbackFetcher {
    client: Client,
    strategies: Arc<Vec<Strategy>>,
    ssrf_protection: bool,
}

impl FallbackFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_strategies(default_strategies())
    }

    pub fn with_strategies(strategies: Vec<Strategy>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(common_headers())
            .redirect(redirect::Policy::limited(5))
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            strategies: Arc::new(strategies),
            ssrf_protection: true,
        })
    }

    /// Disable SSRF protection, allowing requests to private/reserved IPs.
    pub fn allow_private_urls(mut self) -> Self {
        self.ssrf_protection = false;
        self
    }

    async fn attempt(&self, strategy: &Strategy, url: &str) -> Result<String, AppError> {
        let request = match strategy {
            Strategy::Direct { .. } => self
                .client
                .get(url)
                .header("sec-fetch-site", "same-origin"),
            Strategy::Proxy { build, .. } => self.client.get(build(url)),
            Strategy::PostForm { .. } => self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(""),
        };

        let timeout = strategy.timeout();
        let response = request.timeout(timeout).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(timeout.as_secs())
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        // Accept anything below 400, matching browser navigation semantics.
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))?;

        if !is_plausible_html(&body) {
            return Err(AppError::HttpError(format!(
                "implausible response body ({} bytes)",
                body.len()
            )));
        }

        Ok(body)
    }
}

impl Fetcher for FallbackFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if self.ssrf_protection {
            reject_private_hosts(url).await?;
        }

        for strategy in self.strategies.iter() {
            tracing::debug!(strategy = strategy.name(), "Attempting fetch of {url}");
            match self.attempt(strategy, url).await {
                Ok(html) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        bytes = html.len(),
                        "Fetch successful"
                    );
                    return Ok(html);
                }
                Err(e) => {
                    tracing::warn!(strategy = strategy.name(), error = %e, "Fetch attempt failed");
                }
            }
        }

        Err(AppError::FetchExhausted)
    }
}

/// Structural plausibility check on a raw response body.
///
/// Accepts bodies containing a closing `</html>`/`</body>` tag, at least one
/// `<div` opening tag, or more than 1000 raw characters. Everything else is a
/// soft failure that advances the strategy chain.
pub fn is_plausible_html(body: &str) -> bool {
    body.contains("</html>")
        || body.contains("</body>")
        || body.contains("<div")
        || body.len() > 1000
}

/// Browser-mimicking request headers shared by every strategy.
fn common_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
             image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Chromium\";v=\"122\", \"Not(A:Brand\";v=\"24\", \"Google Chrome\";v=\"122\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"macOS\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(
        "upgrade-insecure-requests",
        HeaderValue::from_static("1"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://www.google.com"));
    headers.insert(
        "x-requested-with",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers
}

// ---------------------------------------------------------------------------
// SSRF protection
// ---------------------------------------------------------------------------

/// Reject URLs whose host resolves to a private/reserved IP.
///
/// The URL itself is already normalized and scheme-checked upstream; this
/// only guards the network destination of the direct strategies.
async fn reject_private_hosts(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::InvalidUrl(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::InvalidUrl("URL has no host".to_string()))?;

    // IP literal: check directly without DNS.
    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_private_ip(ip) {
            return Err(AppError::HttpError(format!(
                "SSRF blocked: {host} is a private/reserved IP"
            )));
        }
        return Ok(());
    }

    let port = parsed.port_or_known_default().unwrap_or(443);
    let addrs: Vec<_> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| AppError::NetworkError(format!("DNS resolution failed for {host}: {e}")))?
        .collect();

    if addrs.is_empty() {
        return Err(AppError::NetworkError(format!(
            "DNS resolution returned no addresses for {host}"
        )));
    }

    for addr in &addrs {
        if is_private_ip(addr.ip()) {
            return Err(AppError::HttpError(format!(
                "SSRF blocked: {host} resolves to private/reserved IP {}",
                addr.ip()
            )));
        }
    }

    Ok(())
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local() // includes cloud metadata 169.254.169.254
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || (v4.octets()[0] == 100 && (v4.octets()[1] & 0xC0) == 64) // CGN
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xFFC0) == 0xFE80 // link-local
                || (v6.segments()[0] & 0xFE00) == 0xFC00 // unique local
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_private_ip(IpAddr::V4(v4)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PLAUSIBLE: &str = "<html><body><div>A job posting</div></body></html>";

    fn direct_and_post() -> Vec<Strategy> {
        vec![
            Strategy::Direct {
                timeout: Duration::from_secs(2),
            },
            Strategy::PostForm {
                timeout: Duration::from_secs(2),
            },
        ]
    }

    #[test]
    fn test_plausibility_check() {
        assert!(is_plausible_html("<html><p>x</p></html>"));
        assert!(is_plausible_html("preamble </body>"));
        assert!(is_plausible_html("<div class=\"x\">"));
        assert!(is_plausible_html(&"x".repeat(1001)));
        assert!(!is_plausible_html(""));
        assert!(!is_plausible_html("Access denied"));
        assert!(!is_plausible_html(&"x".repeat(1000)));
    }

    #[test]
    fn test_proxy_url_shaping() {
        let strategies = default_strategies();
        let names: Vec<_> = strategies.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "direct",
                "corsproxy.io",
                "allorigins",
                "thingproxy",
                "cors-anywhere",
                "post-form",
            ]
        );

        let target = "https://example.com/jobs?id=1";
        let built: Vec<String> = strategies
            .iter()
            .filter_map(|s| match s {
                Strategy::Proxy { build, .. } => Some(build(target)),
                _ => None,
            })
            .collect();

        assert_eq!(
            built[0],
            "https://corsproxy.io/?https%3A%2F%2Fexample.com%2Fjobs%3Fid%3D1"
        );
        assert_eq!(
            built[1],
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fexample.com%2Fjobs%3Fid%3D1"
        );
        // Raw passthrough relays take the target un-encoded.
        assert_eq!(
            built[2],
            "https://thingproxy.freeboard.io/fetch/https://example.com/jobs?id=1"
        );
        assert_eq!(
            built[3],
            "https://cors-anywhere.herokuapp.com/https://example.com/jobs?id=1"
        );
    }

    #[test]
    fn test_encode_uses_percent_for_spaces_and_escapes_plus() {
        assert_eq!(
            encode("https://example.com/jobs?q=rust engineer"),
            "https%3A%2F%2Fexample.com%2Fjobs%3Fq%3Drust%20engineer"
        );
        assert_eq!(encode("a+b c"), "a%2Bb%20c");
    }

    #[test]
    fn test_cors_anywhere_gets_longer_timeout() {
        let strategies = default_strategies();
        let cors_anywhere = strategies
            .iter()
            .find(|s| s.name() == "cors-anywhere")
            .unwrap();
        assert_eq!(cors_anywhere.timeout(), Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PLAUSIBLE))
            .expect(1)
            .mount(&server)
            .await;
        // The POST strategy must never fire.
        Mock::given(method("POST"))
            .and(path("/job"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PLAUSIBLE))
            .expect(0)
            .mount(&server)
            .await;

        let fetcher = FallbackFetcher::with_strategies(direct_and_post())
            .unwrap()
            .allow_private_urls();

        let html = fetcher.fetch(&format!("{}/job", server.uri())).await.unwrap();
        assert_eq!(html, PLAUSIBLE);
    }

    #[tokio::test]
    async fn test_implausible_body_advances_to_next_strategy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Access denied"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/job"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200).set_body_string(PLAUSIBLE))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = FallbackFetcher::with_strategies(direct_and_post())
            .unwrap()
            .allow_private_urls();

        let html = fetcher.fetch(&format!("{}/job", server.uri())).await.unwrap();
        assert_eq!(html, PLAUSIBLE);
    }

    #[tokio::test]
    async fn test_all_strategies_rejected_is_exhaustion() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let fetcher = FallbackFetcher::with_strategies(direct_and_post())
            .unwrap()
            .allow_private_urls();

        let err = fetcher
            .fetch(&format!("{}/job", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FetchExhausted));
    }

    #[tokio::test]
    async fn test_ssrf_blocks_loopback_by_default() {
        let fetcher = FallbackFetcher::with_strategies(direct_and_post()).unwrap();
        let err = fetcher.fetch("http://127.0.0.1/admin").await.unwrap_err();
        assert!(err.to_string().contains("SSRF blocked"));
    }

    #[test]
    fn test_private_ip_ranges() {
        for ip in [
            "127.0.0.1",
            "10.0.0.1",
            "172.16.0.1",
            "192.168.1.1",
            "169.254.169.254",
            "0.0.0.0",
            "100.64.0.1",
        ] {
            assert!(is_private_ip(ip.parse().unwrap()), "{ip}");
        }
        for ip in ["8.8.8.8", "1.1.1.1", "93.184.216.34"] {
            assert!(!is_private_ip(ip.parse().unwrap()), "{ip}");
        }
    }

    #[test]
    fn test_private_ipv6_ranges() {
        for ip in ["::1", "::", "fe80::1", "fc00::1", "::ffff:127.0.0.1"] {
            assert!(is_private_ip(ip.parse().unwrap()), "{ip}");
        }
        assert!(!is_private_ip("2001:4860:4860::8888".parse().unwrap()));
    }
}
