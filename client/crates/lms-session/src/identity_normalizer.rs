//! Turns the backend's inconsistent identity envelopes into an [`Identity`].
//!
//! The backend answers login and session checks with a bare user object, an array
//! holding one, or a user nested under one of several wrapper keys, and spells each
//! field in several ways. Extraction is driven by two ordered tables:
//!
//! - [`WRAPPER_KEYS`] decides which nested objects are candidates. Nested candidates
//!   come before the object that wraps them.
//! - [`IDENTITY_RULES`] lists, per field, the aliases to try. For each alias in order
//!   every candidate is tried in order; the first non-empty value wins.

use lms_core::{Identity, normalize_role};
use serde_json::{Map, Value};

/// Keys under which the backend nests the user object
pub const WRAPPER_KEYS: &[&str] = &[
    "data",
    "user",
    "profile",
    "account",
    "admin",
    "student",
    "instructor",
    "result",
    "payload",
];

/// Root flags that mark a non-success envelope when explicitly `false`
pub const FAILURE_FLAGS: &[&str] = &[
    "success",
    "ok",
    "authenticated",
    "isAuthenticated",
    "is_authenticated",
    "loggedIn",
];

/// Wrapper keys that imply the role of the object they wrap
const ROLE_WRAPPERS: &[&str] = &["admin", "student", "instructor"];

const MAX_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Email,
    Role,
    FirstName,
    LastName,
    AvatarUrl,
    /// Split into first/last name; only fills names still empty
    FullName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: IdentityField,
    pub aliases: &'static [&'static str],
}

pub const IDENTITY_RULES: &[FieldRule] = &[
    FieldRule {
        field: IdentityField::Email,
        aliases: &["email", "emailAddress", "email_address", "mail", "username"],
    },
    FieldRule {
        field: IdentityField::Role,
        aliases: &[
            "role",
            "userRole",
            "user_role",
            "roleName",
            "role_name",
            "userType",
            "user_type",
            "roles",
        ],
    },
    FieldRule {
        field: IdentityField::FirstName,
        aliases: &["firstName", "first_name", "firstname", "givenName", "given_name"],
    },
    FieldRule {
        field: IdentityField::LastName,
        aliases: &[
            "lastName",
            "last_name",
            "lastname",
            "familyName",
            "family_name",
            "surname",
        ],
    },
    FieldRule {
        field: IdentityField::AvatarUrl,
        aliases: &[
            "avatarUrl",
            "avatar_url",
            "avatar",
            "profilePicture",
            "profile_picture",
            "photoUrl",
            "photo_url",
            "image",
        ],
    },
    FieldRule {
        field: IdentityField::FullName,
        aliases: &["name", "fullName", "full_name", "displayName", "display_name"],
    },
];

struct Candidate<'a> {
    object: &'a Map<String, Value>,
    via: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct IdentityNormalizer {
    rules: Vec<FieldRule>,
    wrapper_keys: Vec<String>,
}

impl Default for IdentityNormalizer {
    fn default() -> Self {
        Self::new(
            IDENTITY_RULES.to_vec(),
            WRAPPER_KEYS.iter().map(|k| k.to_string()).collect(),
        )
    }
}

impl IdentityNormalizer {
    pub fn new(rules: Vec<FieldRule>, wrapper_keys: Vec<String>) -> Self {
        Self {
            rules,
            wrapper_keys,
        }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Returns `None` for non-success envelopes and for payloads without a
    /// recognizable identity (no email and no recognized role).
    pub fn normalize(&self, payload: &Value) -> Option<Identity> {
        let root = first_element(payload, 0)?;
        let root_object = root.as_object()?;

        if is_rejected(root_object) {
            return None;
        }

        let mut candidates = Vec::new();
        self.collect_candidates(root_object, None, 0, &mut candidates);

        let mut identity = Identity::default();
        for rule in &self.rules {
            let Some(value) = extract(&candidates, rule) else {
                continue;
            };
            match rule.field {
                IdentityField::Email => identity.email = value,
                IdentityField::Role => identity.role = normalize_role(&value),
                IdentityField::FirstName => identity.first_name = value,
                IdentityField::LastName => identity.last_name = value,
                IdentityField::AvatarUrl => identity.avatar_url = value,
                IdentityField::FullName => {
                    let (first, last) = Identity::split_display_name(&value);
                    identity.merge_missing(&Identity {
                        first_name: first,
                        last_name: last,
                        ..Default::default()
                    });
                }
            }
        }

        if identity.role.is_empty()
            && let Some(via) = candidates
                .iter()
                .filter_map(|c| c.via)
                .find(|via| ROLE_WRAPPERS.contains(via))
        {
            identity.role = via.to_string();
        }

        identity.is_recognizable().then_some(identity)
    }

    fn collect_candidates<'a>(
        &'a self,
        object: &'a Map<String, Value>,
        via: Option<&'a str>,
        depth: usize,
        out: &mut Vec<Candidate<'a>>,
    ) {
        if depth < MAX_DEPTH {
            for key in &self.wrapper_keys {
                let Some(child) = object.get(key.as_str()) else {
                    continue;
                };
                if let Some(child_object) = first_element(child, 0).and_then(Value::as_object) {
                    self.collect_candidates(child_object, Some(key.as_str()), depth + 1, out);
                }
            }
        }
        out.push(Candidate { object, via });
    }
}

/// Arrays resolve to their first element.
fn first_element(value: &Value, depth: usize) -> Option<&Value> {
    match value {
        Value::Array(items) if depth < MAX_DEPTH => {
            items.first().and_then(|v| first_element(v, depth + 1))
        }
        Value::Array(_) | Value::Null => None,
        other => Some(other),
    }
}

fn is_rejected(root: &Map<String, Value>) -> bool {
    FAILURE_FLAGS
        .iter()
        .any(|flag| matches!(root.get(*flag), Some(Value::Bool(false))))
}

fn extract(candidates: &[Candidate<'_>], rule: &FieldRule) -> Option<String> {
    rule.aliases.iter().find_map(|alias| {
        candidates.iter().find_map(|c| {
            let value = c.object.get(*alias)?;
            match rule.field {
                IdentityField::Role => role_value(value, 0),
                _ => scalar(value),
            }
        })
    })
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A role may be a string, an object with a `name`, or a list of either.
fn role_value(value: &Value, depth: usize) -> Option<String> {
    match value {
        Value::Object(object) => object
            .get("name")
            .or_else(|| object.get("role"))
            .and_then(scalar),
        Value::Array(items) if depth < MAX_DEPTH => {
            items.first().and_then(|v| role_value(v, depth + 1))
        }
        other => scalar(other),
    }
}
