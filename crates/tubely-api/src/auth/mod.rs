//! Authentication: access tokens and the per-video ownership guard.

pub mod guard;
pub mod jwt;

pub use guard::{authorize_video_owner, bearer_token};
pub use jwt::{JwtService, TOKEN_ISSUER};
