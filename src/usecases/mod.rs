//! Application use cases. Orchestrate domain logic via ports.

pub mod comic_service;
pub mod posting_service;
pub mod publish_flow;
pub mod upload_flow;

#[cfg(test)]
pub(crate) mod fakes;

pub use comic_service::ComicService;
pub use posting_service::{PostStats, PostingService};
