use serde::{Deserialize, Serialize};

/// Parsed view of the free-form role string carried by an identity.
///
/// Parsing never fails: anything outside the known aliases is `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Instructor,
    Student,
    Unrecognized,
}

impl Role {
    pub fn parse(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "admin" | "administrator" | "super_admin" | "superadmin" => Self::Admin,
            "instructor" | "teacher" => Self::Instructor,
            "student" | "learner" => Self::Student,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::Student => "student",
            Self::Unrecognized => "",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrecognized => write!(f, "unrecognized"),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
