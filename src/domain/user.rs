use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered customer, looked up by email.
///
/// The email is the uniqueness key: registering the same address again
/// updates the existing account instead of creating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Inbound registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn into_account(self) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            created_at: Utc::now(),
        }
    }
}
