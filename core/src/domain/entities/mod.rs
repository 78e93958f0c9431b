//! Domain entities for accounts and tokens.

pub mod account;
pub mod token;

pub use account::{Account, UserRole};
pub use token::{refresh_record_key, Claims, IssuedRefreshToken, TokenPair, TokenType};
