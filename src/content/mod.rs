pub mod fetcher;
pub mod source;

pub use fetcher::ContentFetcher;
pub use source::{parse_opensearch, ContentSource, WikipediaSource};
