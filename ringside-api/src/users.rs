use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A platform account used to authenticate administrative requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: UserId,
    pub username: String,
    /// Salted password digest, never the plain password.
    pub password: String,
    pub role: Role,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Promoter,
}

impl Role {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Promoter => 1,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Admin),
            1 => Some(Self::Promoter),
            _ => None,
        }
    }
}
