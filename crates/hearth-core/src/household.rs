//! Households: the tenant boundary every record hangs off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-household preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdSettings {
    /// Display currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_timezone() -> String {
    "Europe/Rome".to_string()
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        HouseholdSettings {
            currency: default_currency(),
            timezone: default_timezone(),
        }
    }
}

/// A household: the ownership key for tasks, expenses, inventory and the
/// rest. Members are user ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    /// Unique identifier
    pub id: String,
    /// Household name
    pub name: String,
    /// Member user ids
    pub members: Vec<String>,
    /// Active invite code, if any
    pub invite_code: Option<String>,
    /// When the invite code stops working
    pub invite_expires_at: Option<DateTime<Utc>>,
    /// Preferences
    #[serde(default)]
    pub settings: HouseholdSettings,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Household {
    /// Create a household with `creator` as its first member.
    pub fn new(name: impl Into<String>, creator: impl Into<String>) -> Self {
        Household {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            members: vec![creator.into()],
            invite_code: None,
            invite_expires_at: None,
            settings: HouseholdSettings::default(),
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` belongs to this household.
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    /// Add a member; duplicates are ignored.
    pub fn add_member(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if !self.has_member(&user_id) {
            self.members.push(user_id);
        }
    }

    /// Whether the invite code matches and has not expired at `now`.
    pub fn invite_is_valid(&self, code: &str, now: DateTime<Utc>) -> bool {
        match (&self.invite_code, self.invite_expires_at) {
            (Some(active), Some(expires)) => active == code && now <= expires,
            (Some(active), None) => active == code,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn creator_is_first_member() {
        let hh = Household::new("Via Roma 12", "ana");
        assert!(hh.has_member("ana"));
        assert!(!hh.has_member("ben"));
    }

    #[test]
    fn add_member_is_idempotent() {
        let mut hh = Household::new("Via Roma 12", "ana");
        hh.add_member("ben");
        hh.add_member("ben");
        assert_eq!(hh.members.len(), 2);
    }

    #[test]
    fn invite_code_expiry() {
        let mut hh = Household::new("Via Roma 12", "ana");
        let now = Utc::now();
        hh.invite_code = Some("HEARTH42".to_string());
        hh.invite_expires_at = Some(now + Duration::hours(24));

        assert!(hh.invite_is_valid("HEARTH42", now));
        assert!(!hh.invite_is_valid("WRONG", now));
        assert!(!hh.invite_is_valid("HEARTH42", now + Duration::hours(25)));
    }
}
