#![allow(dead_code)]

use std::sync::Arc;

use lms_config::{Config, StorageKind};
use lms_core::Portal;
use lms_session::{MemoryNavigator, PortalSession};
use serde_json::{Value, json};

pub fn config_for(base_url: &str, portal: Portal) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.portal.kind = portal;
    config.session.storage = StorageKind::Memory;
    config.session.logout_timeout_ms = 500;
    config
}

pub fn portal_session(
    base_url: &str,
    portal: Portal,
    location: &str,
) -> (PortalSession, Arc<MemoryNavigator>) {
    let navigator = Arc::new(MemoryNavigator::new(location));
    let session = PortalSession::from_config(&config_for(base_url, portal), navigator.clone())
        .expect("session should build");
    (session, navigator)
}

pub fn login_envelope(email: &str, role: &str) -> Value {
    json!({
        "success": true,
        "message": "Logged in",
        "data": {
            "user": {
                "email": email,
                "role": role,
                "first_name": "Jane",
                "last_name": "Q Public",
                "profile_picture": "https://cdn.example.com/jane.png"
            }
        }
    })
}
