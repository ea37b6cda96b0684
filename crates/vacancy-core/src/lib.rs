pub mod error;
pub mod models;
pub mod pipeline;
pub mod testutil;
pub mod traits;
pub mod util;

pub use error::AppError;
pub use models::{ExtractionLimits, JobPosting};
pub use pipeline::ExtractService;
pub use traits::{Extractor, Fetcher};
