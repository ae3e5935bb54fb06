use serde::{Deserialize, Serialize};

/// JWT claims for tokens issued by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Audience
    pub aud: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Token identifier
    pub jti: String,

    /// User email
    pub email: String,

    /// User role
    pub role: String,
}
