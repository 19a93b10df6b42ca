use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CLASS_PENDING: &str = "pending";
pub const CLASS_APPROVED: &str = "approved";
pub const CERTIFICATE_ISSUED: &str = "yes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /users/admin/{email}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AdminFlag {
    pub admin: bool,
}

/// Response of `GET /users/instructor/{email}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct InstructorFlag {
    pub instructor: bool,
}
