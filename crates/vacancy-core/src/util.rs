use url::Url;

use crate::error::AppError;

/// ATS vendors whose routing depends on query parameters.
///
/// For every other site the query string is stripped before fetching; stray
/// tracking parameters trip some job boards' bot detection.
const KEEP_PARAMS_DOMAINS: &[&str] = &["lever.co", "greenhouse.io", "workday.com"];

/// Normalize and validate a user-supplied job posting URL.
///
/// 1. Trim whitespace, prefix `https://` when no scheme is present.
/// 2. Parse; only `http`/`https` are accepted.
/// 3. The hostname must contain a `.`.
/// 4. Strip query parameters unless the host is a keep-params ATS domain.
pub fn normalize_url(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidUrl("URL is required".to_string()));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| AppError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::InvalidUrl(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    let host = url
        .host_str()
        .ok_or_else(|| AppError::InvalidUrl("URL has no host".to_string()))?
        .to_string();

    if !host.contains('.') {
        return Err(AppError::InvalidUrl(format!(
            "'{host}' does not look like a valid hostname"
        )));
    }

    if url.query().is_some() && !keeps_query_params(&host) {
        tracing::debug!("Stripping query parameters from {host}");
        url.set_query(None);
    }

    Ok(url)
}

fn keeps_query_params(host: &str) -> bool {
    KEEP_PARAMS_DOMAINS.iter().any(|d| host.contains(d))
}
