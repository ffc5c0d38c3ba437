//! Profile Data

use crate::domain::profiles::records::{ProfileUuid, Role};

/// New Profile Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub uuid: ProfileUuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
}
