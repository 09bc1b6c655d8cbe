//! Persistent user identity and activity sessions.
//!
//! The anonymous user id is a random UUID generated once and kept in
//! storage forever. The session id is also a random UUID, but it rotates:
//! a session record remembers when it was last touched, and once the gap
//! since that instant exceeds the configured inactivity timeout the next
//! tracking call starts a fresh session.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Storage;
use crate::time::Clock;

const USER_ID_KEY: &str = "uuid";
const SESSION_KEY: &str = "session";

/// The stored session record.
#[derive(Debug, Deserialize, Serialize)]
struct SessionData {
    /// Session id.
    id: String,

    /// Unix timestamp in milliseconds of the last tracking call in this
    /// session.
    accessed: i64,
}

/// Returns the persistent anonymous user id, creating it on first use.
pub(crate) fn unique_user_id(storage: &dyn Storage) -> String {
    if let Some(id) = storage.get(USER_ID_KEY) {
        return id;
    }

    let id = Uuid::new_v4().to_string();
    if let Err(error) = storage.set(USER_ID_KEY, &id) {
        log::warn!("could not persist the anonymous user id: {error}");
    }
    id
}

/// Returns the current session id, rotating it after inactivity.
///
/// Every call refreshes the session's `accessed` timestamp, so a session
/// stays alive as long as tracking calls keep arriving within the timeout.
pub(crate) fn session_id(storage: &dyn Storage, clock: &dyn Clock, timeout: Duration) -> String {
    let now = clock.now();

    let current = storage
        .get(SESSION_KEY)
        .and_then(|raw| serde_json::from_str::<SessionData>(&raw).ok())
        .filter(|session| !is_expired(session, now, timeout));

    let session = match current {
        Some(mut session) => {
            session.accessed = now.timestamp_millis();
            session
        }
        None => SessionData {
            id: Uuid::new_v4().to_string(),
            accessed: now.timestamp_millis(),
        },
    };

    match serde_json::to_string(&session) {
        Ok(encoded) => {
            if let Err(error) = storage.set(SESSION_KEY, &encoded) {
                log::warn!("could not persist the session record: {error}");
            }
        }
        Err(error) => log::warn!("could not encode the session record: {error}"),
    }

    session.id
}

fn is_expired(session: &SessionData, now: DateTime<Utc>, timeout: Duration) -> bool {
    let elapsed = now.timestamp_millis().saturating_sub(session.accessed);
    elapsed > i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::{assert_eq, assert_ne};

    use super::*;
    use crate::storage::MemoryStorage;

    #[derive(Debug)]
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at(seconds: i64) -> FixedClock {
        FixedClock(Utc.timestamp_opt(seconds, 0).single().expect("valid"))
    }

    #[test]
    fn user_id_is_created_once_and_reused() {
        let storage = MemoryStorage::default();

        let first = unique_user_id(&storage);
        let second = unique_user_id(&storage);

        assert_eq!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn session_survives_within_the_timeout() {
        let storage = MemoryStorage::default();
        let timeout = Duration::from_secs(1800);

        let first = session_id(&storage, &at(0), timeout);
        let second = session_id(&storage, &at(1800), timeout);

        assert_eq!(first, second);
    }

    #[test]
    fn session_rotates_after_the_timeout() {
        let storage = MemoryStorage::default();
        let timeout = Duration::from_secs(1800);

        let first = session_id(&storage, &at(0), timeout);
        let second = session_id(&storage, &at(1801), timeout);

        assert_ne!(first, second);
    }

    #[test]
    fn activity_refreshes_the_session() {
        let storage = MemoryStorage::default();
        let timeout = Duration::from_secs(1800);

        let first = session_id(&storage, &at(0), timeout);
        // Each call is within the timeout of the previous one, even though
        // the last is far past the timeout relative to the first.
        let second = session_id(&storage, &at(1500), timeout);
        let third = session_id(&storage, &at(3000), timeout);

        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn corrupt_session_records_start_a_fresh_session() {
        let storage = MemoryStorage::default();
        storage.set(SESSION_KEY, "not json").expect("set succeeds");

        let id = session_id(&storage, &at(0), Duration::from_secs(1800));

        assert!(Uuid::parse_str(&id).is_ok());
    }
}
