//! Infrastructure layer: concrete implementations of the domain traits.

pub mod dto;
pub mod registry;
pub mod repository;
