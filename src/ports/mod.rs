//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by the application into infrastructure (comic API, VK API, entropy)

pub mod outbound;

pub use outbound::{ComicSource, MethodParams, RandomSource, SocialApi};
