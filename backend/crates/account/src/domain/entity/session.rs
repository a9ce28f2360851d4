//! Session Entity
//!
//! Server-side login session. The cookie carries a signed reference to
//! `session_id`.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{SessionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub remember_me: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, remember_me: bool, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at: now + ttl,
            remember_me,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_valid() {
        let session = Session::new(UserId::new(), false, Duration::days(1));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::new(UserId::new(), true, Duration::days(30));
        assert!(!session.is_expired_at(session.expires_at - Duration::seconds(1)));
        assert!(session.is_expired_at(session.expires_at));
    }
}
