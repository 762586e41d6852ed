//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hotel_core::types::UserId;
use hotel_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from verified token claims and passed into
/// service methods so every operation knows who is acting, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Account email from the token (may be empty).
    pub email: String,
    /// When the request was received; the reference instant for time rules.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context stamped with the current time.
    pub fn new(user_id: UserId, role: UserRole, email: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            email: email.into(),
            request_time: Utc::now(),
        }
    }

    /// Override the reference instant.
    pub fn at(mut self, request_time: DateTime<Utc>) -> Self {
        self.request_time = request_time;
        self
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
