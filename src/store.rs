//! In-memory persistence for farmer profiles and session tokens.
//!
//! The store is a trait so a database-backed implementation can slot in
//! later without touching the engine; the default implementation keeps
//! everything behind `RwLock`ed maps.

use crate::error::{Result, ShambaError};
use crate::models::FarmerProfile;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

pub trait UserStore: Send + Sync {
    fn get(&self, username: &str) -> Option<FarmerProfile>;

    /// Insert a profile only if the username is free. The check and the
    /// insert happen under one lock so concurrent registrations of the
    /// same name cannot both succeed.
    fn insert_new(&self, profile: FarmerProfile) -> Result<()>;

    fn update(&self, profile: FarmerProfile) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, FarmerProfile>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, username: &str) -> Option<FarmerProfile> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.get(username).cloned()
    }

    fn insert_new(&self, profile: FarmerProfile) -> Result<()> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        if users.contains_key(&profile.username) {
            return Err(ShambaError::UserAlreadyExists(profile.username));
        }
        users.insert(profile.username.clone(), profile);
        Ok(())
    }

    fn update(&self, profile: FarmerProfile) -> Result<()> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        if !users.contains_key(&profile.username) {
            return Err(ShambaError::NotFound(profile.username));
        }
        users.insert(profile.username.clone(), profile);
        Ok(())
    }
}

/// Opaque bearer tokens mapped to usernames. Tokens are random UUIDs;
/// resolving an unknown token yields `None`, which callers surface as
/// `AuthRequired`.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(token.clone(), username.to_string());
        token
    }

    pub fn resolve(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(token).cloned()
    }

    pub fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_COORDINATES;
    use std::sync::Arc;

    fn profile(username: &str) -> FarmerProfile {
        FarmerProfile {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: format!("{}@example.com", username),
            county: "Nairobi".to_string(),
            farm_type: "Mixed".to_string(),
            coordinates: DEFAULT_COORDINATES,
            crops: vec!["Maize".to_string()],
            livestock: Vec::new(),
            farm_size_acres: 2.0,
            soil_type: "Loam".to_string(),
            elevation_m: 1795.0,
        }
    }

    #[test]
    fn insert_then_get_round_trips() {
        let store = MemoryUserStore::new();
        store.insert_new(profile("wanjiku")).unwrap();
        let fetched = store.get("wanjiku").unwrap();
        assert_eq!(fetched.county, "Nairobi");
        assert!(store.get("otieno").is_none());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = MemoryUserStore::new();
        store.insert_new(profile("wanjiku")).unwrap();
        let err = store.insert_new(profile("wanjiku")).unwrap_err();
        assert!(matches!(err, ShambaError::UserAlreadyExists(ref u) if u == "wanjiku"));
    }

    #[test]
    fn concurrent_registration_admits_exactly_one() {
        let store = Arc::new(MemoryUserStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.insert_new(profile("wanjiku")).is_ok()
            }));
        }
        let successes = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|admitted| *admitted)
            .count();
        assert_eq!(successes, 1);
    }

    #[test]
    fn update_requires_existing_user() {
        let store = MemoryUserStore::new();
        let err = store.update(profile("wanjiku")).unwrap_err();
        assert!(matches!(err, ShambaError::NotFound(_)));

        store.insert_new(profile("wanjiku")).unwrap();
        let mut updated = profile("wanjiku");
        updated.farm_size_acres = 5.5;
        store.update(updated).unwrap();
        assert_eq!(store.get("wanjiku").unwrap().farm_size_acres, 5.5);
    }

    #[test]
    fn sessions_resolve_until_revoked() {
        let sessions = SessionStore::new();
        let token = sessions.issue("wanjiku");
        assert_eq!(sessions.resolve(&token).as_deref(), Some("wanjiku"));
        assert!(sessions.revoke(&token));
        assert!(sessions.resolve(&token).is_none());
        assert!(!sessions.revoke(&token));
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        let sessions = SessionStore::new();
        let a = sessions.issue("wanjiku");
        let b = sessions.issue("wanjiku");
        assert_ne!(a, b);
        assert_eq!(sessions.resolve(&b).as_deref(), Some("wanjiku"));
    }
}
