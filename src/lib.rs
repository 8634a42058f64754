//! xkcd-vk-poster: posts a random xkcd comic to a VK group wall, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
