//! Domain entities.

pub mod entities;

pub use entities::*;
