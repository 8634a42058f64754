//! VK adapter module. Implements SocialApi.
//!
//! Provides the HTTP client and a dry-run adapter that only logs.

pub mod client;
pub mod dry_run;

pub use client::VkClient;
pub use dry_run::DryRunVkAdapter;
