//! Authentication: JWT tokens and axum middleware.

pub mod jwt;
pub mod middleware;

pub use jwt::{ActorKind, Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_customer, require_staff};
