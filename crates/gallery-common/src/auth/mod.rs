//! Bearer tokens for guests and admins

mod jwt;

pub use jwt::{Claims, IssuedToken, JwtService, TokenType};
