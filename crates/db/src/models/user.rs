//! User models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A user row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub nickname: String,
    pub fullname: String,
    pub email: String,
    pub about: String,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for registering a user. The nickname comes from the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub about: String,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for a profile update. Omitted and empty fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
}

impl UpdateUser {
    /// Drop empty strings so they behave like omitted fields.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            fullname: keep(self.fullname),
            email: keep(self.email),
            about: keep(self.about),
        }
    }

    /// `true` when nothing would change.
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none() && self.email.is_none() && self.about.is_none()
    }
}
