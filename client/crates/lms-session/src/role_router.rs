use lms_config::{
    DEFAULT_ACCESS_DENIED, DEFAULT_ADMIN_HOME, DEFAULT_INSTRUCTOR_HOME, DEFAULT_STUDENT_HOME,
    RoutingConfig, UnknownRolePolicy,
};
use lms_core::Role;
use log::warn;

/// Maps a role to the landing path of its home area.
///
/// Total: every input, including empty and unrecognized roles, yields a non-empty path.
/// Where an unrecognized role lands is decided by the [`UnknownRolePolicy`].
#[derive(Debug, Clone)]
pub struct RoleRouter {
    admin_home: String,
    student_home: String,
    instructor_home: String,
    access_denied: String,
    policy: UnknownRolePolicy,
}

impl Default for RoleRouter {
    fn default() -> Self {
        Self::new(&RoutingConfig::default())
    }
}

impl RoleRouter {
    pub fn new(config: &RoutingConfig) -> Self {
        if config.unknown_role_policy == UnknownRolePolicy::Administrative {
            warn!("Unknown roles will land on the administrative home ({})", config.admin_home);
        }

        Self {
            admin_home: non_blank(&config.admin_home, DEFAULT_ADMIN_HOME),
            student_home: non_blank(&config.student_home, DEFAULT_STUDENT_HOME),
            instructor_home: non_blank(&config.instructor_home, DEFAULT_INSTRUCTOR_HOME),
            access_denied: non_blank(&config.access_denied, DEFAULT_ACCESS_DENIED),
            policy: config.unknown_role_policy,
        }
    }

    pub fn policy(&self) -> UnknownRolePolicy {
        self.policy
    }

    pub fn landing_path(&self, role: &str) -> &str {
        self.landing_for(Role::parse(role))
    }

    pub fn landing_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::Instructor => &self.instructor_home,
            Role::Student => &self.student_home,
            Role::Unrecognized => match self.policy {
                UnknownRolePolicy::Deny => &self.access_denied,
                UnknownRolePolicy::LeastPrivilege => &self.student_home,
                UnknownRolePolicy::Administrative => &self.admin_home,
            },
        }
    }

    pub fn access_denied_path(&self) -> &str {
        &self.access_denied
    }
}

fn non_blank(path: &str, fallback: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        fallback.to_string()
    } else {
        path.to_string()
    }
}
