use serde::{Deserialize, Serialize};

use crate::users::Role;

/// The claims carried by every issued token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The id of the authenticated user.
    pub sub: u64,
    pub role: Role,
    pub iat: u64,
    pub nbf: u64,
    pub exp: u64,
}

impl Claims {
    /// Creates new `Claims` with all timestamps zeroed. The server
    /// fills in `iat`, `nbf` and `exp` when issuing tokens.
    #[inline]
    pub fn new(sub: u64, role: Role) -> Self {
        Self {
            sub,
            role,
            iat: 0,
            nbf: 0,
            exp: 0,
        }
    }
}

/// A short-lived auth token and a longer-lived refresh token, issued
/// together on login and refresh.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub auth_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshToken {
    pub refresh_token: String,
}
