//! Infrastructure adapters. Implement outbound ports.
//!
//! Comic API, VK API, OS entropy. Map errors to DomainError.

pub mod http;
pub mod random;
pub mod vk;
pub mod xkcd;

#[cfg(test)]
pub(crate) mod test_support;
