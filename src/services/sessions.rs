use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{booking::BookingStore, profile::AccountProfile};

// One signed-in browser session. Everything here is transient: bookings and
// profile edits vanish when the session is destroyed or the process exits.
#[derive(Debug)]
pub struct UserSession {
    pub username: String,
    pub started_at: DateTime<Utc>,
    pub bookings: BookingStore,
    pub profile: AccountProfile,
}

#[derive(Clone, Default)]
pub struct SessionService {
    inner: Arc<Mutex<HashMap<String, UserSession>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, username: &str) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.lock().insert(
            session_id.clone(),
            UserSession {
                username: username.to_string(),
                started_at: Utc::now(),
                bookings: BookingStore::new(),
                profile: AccountProfile::default(),
            },
        );
        session_id
    }

    pub fn destroy(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    pub fn username(&self, session_id: &str) -> Option<String> {
        self.lock()
            .get(session_id)
            .map(|session| session.username.clone())
    }

    // Runs `f` under the map lock; the handlers never await while inside.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut UserSession) -> T,
    ) -> Option<T> {
        self.lock().get_mut(session_id).map(f)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UserSession>> {
        // A poisoned lock means a handler panicked mid-update; the map is
        // still usable, so keep serving the remaining sessions.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_isolated_from_each_other() {
        let sessions = SessionService::new();
        let first = sessions.create("traveler");
        let second = sessions.create("traveler");
        assert_ne!(first, second);

        sessions.with_session(&first, |session| {
            session.bookings.create(
                "NYC",
                "LAX",
                "2024-01-10".parse().expect("date"),
                "2024-01-20".parse().expect("date"),
                "2",
                crate::models::booking::AgeRange::Adult,
            );
        });

        assert_eq!(
            sessions.with_session(&first, |s| s.bookings.len()),
            Some(1)
        );
        assert_eq!(
            sessions.with_session(&second, |s| s.bookings.len()),
            Some(0)
        );
    }

    #[test]
    fn destroy_drops_the_session_and_its_bookings() {
        let sessions = SessionService::new();
        let id = sessions.create("traveler");
        assert_eq!(sessions.username(&id).as_deref(), Some("traveler"));

        sessions.destroy(&id);
        assert!(sessions.username(&id).is_none());
        assert!(sessions.with_session(&id, |_| ()).is_none());
    }
}
