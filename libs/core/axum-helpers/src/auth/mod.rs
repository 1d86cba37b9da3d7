//! Bearer-token authorization for write endpoints.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`. The role gate only checks
//! the signature, expiry and the `roles` claim; issuing tokens to end users
//! belongs to the identity service.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, require_admin};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let admin_routes = Router::new()
//!     .route("/", post(create))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, require_admin));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::require_admin;
