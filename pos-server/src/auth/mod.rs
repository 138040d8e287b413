//! Authentication
//!
//! - [`JwtService`] - token verification
//! - [`CurrentUser`] - extractor for signed-in users
//! - [`AdminUser`] - extractor for admins

pub mod extractor;
pub mod jwt;

pub use extractor::AdminUser;
pub use jwt::{ACCESS_TOKEN_COOKIE, Claims, CurrentUser, JwtConfig, JwtError, JwtService};
