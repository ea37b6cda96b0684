use scraper::{ElementRef, Html, Selector};
use url::Url;

use vacancy_core::error::AppError;
use vacancy_core::models::{ExtractionLimits, JobPosting};
use vacancy_core::traits::Extractor;

use crate::rules::{
    self, CompanyHint, GENERIC_COMPANY_SELECTORS, GENERIC_DESCRIPTION_SELECTORS,
};
use crate::text::{clean_text, is_valid_description};

/// CSS-selector-driven job posting extractor.
///
/// Runs a short-circuiting fallback cascade over the parsed document:
/// site-specific rule → generic selectors → largest text block → degraded
/// acceptance. Every stage shares one validity predicate and produces either
/// candidate text or nothing; absence of a match only advances the cascade.
#[derive(Clone, Default)]
pub struct SelectorExtractor {
    limits: ExtractionLimits,
}

impl SelectorExtractor {
    pub fn new() -> Self {
        Self::with_limits(ExtractionLimits::default())
    }

    pub fn with_limits(limits: ExtractionLimits) -> Self {
        Self { limits }
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, url: &Url, html: &str) -> Result<JobPosting, AppError> {
        let doc = Html::parse_document(html);
        let host = url.host_str().unwrap_or_default();

        let rule = rules::rule_for_host(host);
        let mut description = String::new();
        let mut company = String::new();

        // Site-specific attempt.
        if let Some(rule) = rule {
            tracing::debug!(domain = rule.domain, "Using site-specific selectors");
            if let Some(text) = first_valid_text(&doc, rule.description_selectors, &self.limits) {
                description = text;
            }
            if let Some(name) = company_from_hints(&doc, rule.company_hints) {
                company = name;
            }
        }

        // Generic selector fallback.
        if description.is_empty() {
            if rule.is_some() {
                tracing::debug!("Site-specific selectors yielded nothing, trying generic");
            }
            if let Some(text) = first_valid_text(&doc, GENERIC_DESCRIPTION_SELECTORS, &self.limits)
            {
                description = text;
            }
        }

        // Largest-block fallback.
        if description.is_empty() {
            if let Some(block) = largest_text_block(&doc, &self.limits) {
                if is_valid_description(&block, &self.limits) {
                    tracing::debug!(chars = block.len(), "Using largest text block");
                    description = block;
                } else if block.chars().count() >= self.limits.min_description_len {
                    tracing::warn!(
                        chars = block.len(),
                        "Using largest text block despite failed validation"
                    );
                    description = block;
                }
            }
        }

        // Company-name fallback cascade.
        if company.is_empty() {
            if let Some(name) = company_fallback(&doc) {
                company = name;
            }
        }
        if company.is_empty() {
            if let Some(name) = company_from_url(url) {
                company = name;
            }
        }

        // Final validation with degraded acceptance.
        let description = clean_text(&description);
        let company = {
            let cleaned = clean_text(&company);
            if cleaned.is_empty() {
                JobPosting::UNKNOWN_COMPANY.to_string()
            } else {
                cleaned
            }
        };

        let degraded = !is_valid_description(&description, &self.limits);
        if degraded {
            if description.chars().count() >= self.limits.degraded_floor {
                tracing::warn!(
                    chars = description.len(),
                    "Returning job description that failed full validation"
                );
            } else {
                tracing::warn!(
                    chars = description.len(),
                    "No extraction path produced a usable description"
                );
                return Err(AppError::NoValidDescription);
            }
        }

        Ok(JobPosting {
            job_description: description,
            company_name: company,
            degraded,
        })
    }
}

/// First element matching `selector_str`, skipping selectors that fail to parse.
fn select_first<'a>(doc: &'a Html, selector_str: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector_str).ok()?;
    doc.select(&selector).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of every element matching `selector_str`.
///
/// Job boards repeat container classes per section (Lever renders one
/// `.posting-category-content` per heading), so a selector's value is the
/// text of all its matches, not just the first.
fn all_matches_text(doc: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    let parts: Vec<String> = doc.select(&selector).map(element_text).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Value of a selector: `content`/`href` attribute of the first match for
/// `meta`/`link` elements, concatenated text of all matches otherwise.
fn selector_value(doc: &Html, selector_str: &str) -> Option<String> {
    let element = select_first(doc, selector_str)?;
    match element.value().name() {
        "meta" => element.value().attr("content").map(str::to_string),
        "link" => element.value().attr("href").map(str::to_string),
        _ => all_matches_text(doc, selector_str),
    }
}

/// First selector whose cleaned text passes the validity predicate.
fn first_valid_text(doc: &Html, selectors: &[&str], limits: &ExtractionLimits) -> Option<String> {
    for selector in selectors {
        if let Some(text) = all_matches_text(doc, selector) {
            let cleaned = clean_text(&text);
            if is_valid_description(&cleaned, limits) {
                tracing::debug!(selector, "Found valid job description");
                return Some(cleaned);
            }
        }
    }
    None
}

fn title_text(doc: &Html) -> Option<String> {
    select_first(doc, "title").map(element_text)
}

/// First company hint yielding non-empty text.
fn company_from_hints(doc: &Html, hints: &[CompanyHint]) -> Option<String> {
    for hint in hints {
        let candidate = match hint {
            CompanyHint::Css(selector) => selector_value(doc, selector),
            CompanyHint::CssFirst(selector) => select_first(doc, selector).map(element_text),
            CompanyHint::Attr(selector, attr) => select_first(doc, selector)
                .and_then(|el| el.value().attr(attr))
                .map(str::to_string),
            CompanyHint::TitleAfter { sep, until } => title_text(doc).map(|title| {
                let tail = title.rsplit(sep).next().unwrap_or(&title).to_string();
                match until {
                    Some(until) => tail.split(until).next().unwrap_or(&tail).to_string(),
                    None => tail,
                }
            }),
            CompanyHint::TitleBefore { sep } => title_text(doc)
                .map(|title| title.split(sep).next().unwrap_or(&title).to_string()),
        };

        if let Some(candidate) = candidate {
            let cleaned = clean_text(&candidate);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}

/// Generic company-name scan over common meta/selector patterns.
///
/// Values containing slashes (URLs, paths) are reduced to their last segment.
fn company_fallback(doc: &Html) -> Option<String> {
    for selector in GENERIC_COMPANY_SELECTORS {
        if let Some(value) = selector_value(doc, selector) {
            let mut cleaned = clean_text(&value);
            if cleaned.contains('/') {
                if let Some(segment) = cleaned.split('/').filter(|s| !s.is_empty()).next_back() {
                    cleaned = segment.to_string();
                }
            }
            if !cleaned.is_empty() {
                tracing::debug!(selector, "Found company name");
                return Some(cleaned);
            }
        }
    }
    None
}

/// Derive a company name from the URL's second-level domain label.
fn company_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return None;
    }
    let label = labels[labels.len() - 2];
    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

/// Largest cleaned text block within the configured length window.
fn largest_text_block(doc: &Html, limits: &ExtractionLimits) -> Option<String> {
    let selector = Selector::parse("div, section, article, main, p").ok()?;
    let mut largest: Option<String> = None;

    for element in doc.select(&selector) {
        let cleaned = clean_text(&element_text(element));
        let len = cleaned.chars().count();
        if len <= limits.block_floor || len >= limits.block_ceiling {
            continue;
        }
        if largest.as_ref().is_none_or(|best| len > best.chars().count()) {
            largest = Some(cleaned);
        }
    }

    largest
}
