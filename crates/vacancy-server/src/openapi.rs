use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vacancy API",
        version = "0.1.0",
        description = "Job posting extraction: fetch a posting URL through a proxy \
                       fallback chain and extract a validated description and company name."
    ),
    paths(crate::routes::extract_job, crate::routes::health),
    components(schemas(
        crate::dto::ExtractJobRequest,
        crate::dto::ExtractJobResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "extract", description = "Job posting extraction"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme to the generated OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("token")
                        .description(Some(
                            "API key. Set via VACANCY_API_KEY environment variable.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
