//! User account models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// A user account
///
/// `location` names both the spreadsheet tab and the physical selling point
/// the account is attached to; admins may have none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub location: Option<String>,
}
