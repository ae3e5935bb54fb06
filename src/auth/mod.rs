//! JWT authentication boundary

pub mod claims;
pub mod middleware;
pub mod token;

pub use claims::Claims;
pub use middleware::RequireAuth;
pub use token::TokenService;
