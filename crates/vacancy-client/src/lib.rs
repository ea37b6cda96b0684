pub mod extractor;
pub mod fetcher;
pub mod rules;
pub mod text;

pub use extractor::SelectorExtractor;
pub use fetcher::{FallbackFetcher, Strategy};
