pub mod auth_dto;

pub use auth_dto::*;
pub use wdc_shared::errors::ErrorResponse;
