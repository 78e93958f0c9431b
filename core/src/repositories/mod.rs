pub mod token;
pub mod user;

pub use token::RefreshTokenStore;
pub use user::UserRepository;

#[cfg(test)]
pub use token::MockRefreshTokenStore;
#[cfg(test)]
pub use user::MockUserRepository;
