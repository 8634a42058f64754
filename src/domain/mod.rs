//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    ApiResponse, ComicMetadata, DownloadedComic, SavedPhotoRef, UploadResult, VkCredentials,
};
pub use errors::DomainError;
