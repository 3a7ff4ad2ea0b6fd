pub mod error;
pub mod extractor;
pub mod provider;
pub mod query;
pub mod response;
