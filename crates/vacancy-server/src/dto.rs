use serde::{Deserialize, Serialize};

use vacancy_core::models::JobPosting;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ExtractJobRequest {
    /// Job posting URL. A missing scheme is treated as `https://`.
    pub url: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractJobResponse {
    pub job_description: String,
    pub company_name: String,
}

impl From<JobPosting> for ExtractJobResponse {
    fn from(posting: JobPosting) -> Self {
        Self {
            job_description: posting.job_description,
            company_name: posting.company_name,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
