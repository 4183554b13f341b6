use crate::Role;

use serde::{Deserialize, Serialize};

/// Normalized authenticated-user record.
///
/// Every field is a plain string; an empty string means "unknown". In particular the
/// role is never absent, only empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: normalize_role(&role.into()),
            ..Default::default()
        }
    }

    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into().trim().to_string();
        self.last_name = last.into().trim().to_string();
        self
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = avatar_url.into().trim().to_string();
        self
    }

    /// Splits a display name on its first whitespace run.
    ///
    /// `"Jane Q Public"` becomes first `"Jane"`, last `"Q Public"`.
    pub fn split_display_name(name: &str) -> (String, String) {
        let trimmed = name.trim();
        match trimmed.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (trimmed.to_string(), String::new()),
        }
    }

    pub fn from_display_name(
        email: impl Into<String>,
        role: impl Into<String>,
        display_name: &str,
    ) -> Self {
        let (first, last) = Self::split_display_name(display_name);
        Self::new(email, role).with_names(first, last)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn role_kind(&self) -> Role {
        Role::parse(&self.role)
    }

    /// An identity is recognizable when it carries an email, or a role that parses
    /// to a known [`Role`]. A bare unknown role is not enough to name a user.
    pub fn is_recognizable(&self) -> bool {
        !self.email.is_empty() || self.role_kind().is_recognized()
    }

    /// Fill-if-missing merge: only empty fields of `self` take values from `other`.
    ///
    /// Known fields are never overwritten, so a lean session-check response cannot erase
    /// what a richer login response supplied.
    pub fn merge_missing(&mut self, other: &Identity) {
        fill(&mut self.email, &other.email);
        fill(&mut self.role, &other.role);
        fill(&mut self.first_name, &other.first_name);
        fill(&mut self.last_name, &other.last_name);
        fill(&mut self.avatar_url, &other.avatar_url);
    }

    /// Returns `self` merged over `known`, when `known` describes the same user.
    ///
    /// A different email means a different account; nothing is inherited in that case.
    pub fn merged_with_known(mut self, known: Option<&Identity>) -> Self {
        if let Some(known) = known {
            let same_account = self.email.is_empty()
                || known.email.is_empty()
                || self.email.eq_ignore_ascii_case(&known.email);
            if same_account {
                self.merge_missing(known);
            }
        }
        self
    }
}

/// Lowercases and trims a role string.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

fn fill(target: &mut String, candidate: &str) {
    if target.trim().is_empty() && !candidate.trim().is_empty() {
        *target = candidate.to_string();
    }
}
