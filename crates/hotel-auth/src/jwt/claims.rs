//! JWT claims structure carried in access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hotel_core::types::UserId;
use hotel_entity::user::UserRole;

/// Claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Account email at issuance.
    #[serde(default)]
    pub email: String,
    /// User role at issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the bearer may use admin endpoints.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
