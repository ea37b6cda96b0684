//! Static per-site extraction rules for recognized job boards.
//!
//! Rules are an ordered table of plain records: the first rule whose domain
//! fragment appears in the request hostname wins, and rule order is part of
//! the contract.

/// How to locate a company name within a parsed document.
#[derive(Debug, Clone, Copy)]
pub enum CompanyHint {
    /// Concatenated text of every element matching a CSS selector
    /// (`content`/`href` attribute of the first match for `meta`/`link`).
    Css(&'static str),
    /// Text of only the first element matching a selector, for containers
    /// whose later matches carry unrelated text (ratings, badges).
    CssFirst(&'static str),
    /// A named attribute of the first element matching a selector.
    Attr(&'static str, &'static str),
    /// The part of `<title>` after the last `sep`, truncated before `until`.
    /// Covers "Engineer at Acme | Careers" style titles.
    TitleAfter {
        sep: &'static str,
        until: Option<&'static str>,
    },
    /// The part of `<title>` before the first `sep`.
    /// Covers "Acme is hiring an Engineer" style titles.
    TitleBefore { sep: &'static str },
}

/// Selector configuration for one recognized job-board domain.
#[derive(Debug)]
pub struct SiteRule {
    /// Substring matched against the request hostname.
    pub domain: &'static str,
    /// Description selectors, tried in order until one yields valid text.
    pub description_selectors: &'static [&'static str],
    /// Company-name sources, tried in order until one yields non-empty text.
    pub company_hints: &'static [CompanyHint],
}

/// Ordered rule table. A hostname containing multiple fragments resolves to
/// the earliest entry.
pub const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        domain: "linkedin.com",
        description_selectors: &[
            ".description__text",
            ".show-more-less-html__markup",
            ".jobs-description__content",
            ".jobs-box__html-content",
            ".jobs-description",
            "[data-test-id=\"job-details\"]",
            "#job-details",
            "[data-test-id=\"description\"]",
            ".jobs-unified-top-card__job-insight",
            ".jobs-unified-top-card__description-container",
        ],
        company_hints: &[
            CompanyHint::Css(".jobs-unified-top-card__company-name"),
            CompanyHint::Css(".jobs-company__name"),
            CompanyHint::Css(".topcard__org-name-link"),
            CompanyHint::Css("[data-test-job-card-company-name]"),
        ],
    },
    SiteRule {
        domain: "indeed.com",
        description_selectors: &[
            "#jobDescriptionText",
            ".jobsearch-jobDescriptionText",
            "#job-content",
            "[data-testid=\"jobDescriptionText\"]",
            "#jobDescription",
            ".job-desc",
            "#jobDescriptionSection",
            ".job_description",
            "#job-details",
        ],
        company_hints: &[
            CompanyHint::CssFirst(".jobsearch-InlineCompanyRating div"),
            CompanyHint::Css(".jobsearch-CompanyInfoContainer"),
            CompanyHint::Css("[data-testid=\"inlineHeader-companyName\"]"),
            CompanyHint::Css(".jobsearch-JobInfoHeader-subtitle"),
        ],
    },
    SiteRule {
        domain: "greenhouse.io",
        description_selectors: &[
            "#content",
            "#gh-job-content",
            ".content",
            "[data-test=\"description\"]",
            "#job-content",
            ".job-description",
            "#job_description",
            ".job-app-body",
        ],
        company_hints: &[
            CompanyHint::TitleAfter {
                sep: "at",
                until: Some("|"),
            },
            CompanyHint::Css(".company-name"),
            CompanyHint::Css(".app-title"),
        ],
    },
    SiteRule {
        domain: "lever.co",
        description_selectors: &[
            ".posting-page",
            ".posting-category-content",
            "#job-content",
            ".section-wrapper",
            ".posting-requirements",
            ".posting-headline",
            ".posting",
        ],
        company_hints: &[
            CompanyHint::Css(".posting-header h2"),
            CompanyHint::Css(".job-title-company"),
            CompanyHint::Attr(".main-header-logo img", "alt"),
            CompanyHint::TitleBefore { sep: " is hiring " },
        ],
    },
    SiteRule {
        domain: "workday.com",
        description_selectors: &[
            ".job-description",
            "#job-description",
            ".job-posting-section",
            ".css-1k5wd3l",
            ".css-kyg8or",
            "[data-automation-id='jobPostingDescription']",
            "[data-automation-id='jobReqDescription']",
        ],
        company_hints: &[
            CompanyHint::TitleBefore { sep: "-" },
            CompanyHint::Css("[data-automation-id='jobPostingHeader']"),
            CompanyHint::Css(".css-1k5wd3l h3"),
        ],
    },
    SiteRule {
        domain: "ziprecruiter.com",
        description_selectors: &[
            ".job_description",
            "#job-description",
            ".jobDescriptionSection",
            ".job-details",
            ".description",
            "#description",
        ],
        company_hints: &[
            CompanyHint::Css(".hiring_company"),
            CompanyHint::Css(".company_name"),
            CompanyHint::Css(".company-name"),
        ],
    },
    SiteRule {
        domain: "monster.com",
        description_selectors: &[
            ".job-description",
            "#JobDescription",
            ".details-content",
            ".job-description-container",
            ".description-section",
        ],
        company_hints: &[
            CompanyHint::Css(".company-name"),
            CompanyHint::Css(".name"),
            CompanyHint::Css(".job-company"),
        ],
    },
];

/// First rule whose domain fragment is contained in `host`, if any.
pub fn rule_for_host(host: &str) -> Option<&'static SiteRule> {
    SITE_RULES.iter().find(|rule| host.contains(rule.domain))
}

/// Generic structural selectors for unknown sites (or when a site rule
/// yields nothing valid), tried in order.
pub const GENERIC_DESCRIPTION_SELECTORS: &[&str] = &[
    ".job-description",
    "#job-description",
    ".description",
    ".job-details",
    "[data-testid=\"jobDescriptionText\"]",
    "article",
    ".posting-requirements",
    ".details",
    ".job-desc",
    "#job_description",
    ".job_description",
    ".description-section",
    ".job-overview",
    ".job-content",
    "main",
    ".main-content",
    "[role=\"main\"]",
    "#main",
    ".content-main",
    "[data-test=\"description\"]",
    "[data-test=\"job-description\"]",
    ".job-posting-section",
    ".job-details-content",
    ".job-posting__description",
    "#content",
    ".content",
    ".job-posting",
    ".job-post",
    ".job",
    ".careers-job-description",
    ".careers-description",
    ".job-summary",
    ".summary",
    ".job-info",
    ".job-body",
    ".job-page",
    ".job-detail",
    ".job-details-description",
];

/// Generic company-name sources for unknown sites, tried in order.
pub const GENERIC_COMPANY_SELECTORS: &[&str] = &[
    ".company-name",
    ".company",
    ".employer",
    ".organization",
    "meta[property=\"og:site_name\"]",
    "meta[name=\"author\"]",
    ".company-info",
    ".employer-info",
    "h1 + p",
    ".posting-company",
    "meta[property=\"og:title\"]",
    "meta[name=\"title\"]",
    ".job-company-name",
    "[data-test=\"company-name\"]",
    ".job-company",
    ".employer-name",
    ".hiring-company",
    ".job-employer",
    "meta[name=\"twitter:site\"]",
    "link[rel=\"publisher\"]",
];
