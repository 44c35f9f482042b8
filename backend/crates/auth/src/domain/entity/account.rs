//! Account Entity
//!
//! A help-desk user: identity (email), optional profile fields, and the
//! password hash.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::{
    email::Email, national_id::NationalId, user_password::UserPassword,
};

/// Optional personal data attached to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<NationalId>,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub email: Email,
    pub profile: AccountProfile,
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: Email, password: UserPassword, profile: AccountProfile) -> Self {
        let now = Utc::now();
        Self {
            account_id: AccountId::new(),
            email,
            profile,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite only the fields that are present.
    pub fn apply_profile(&mut self, changes: AccountProfile) {
        if let Some(first_name) = changes.first_name {
            self.profile.first_name = Some(first_name);
        }
        if let Some(last_name) = changes.last_name {
            self.profile.last_name = Some(last_name);
        }
        if let Some(national_id) = changes.national_id {
            self.profile.national_id = Some(national_id);
        }
        self.touch();
    }

    pub fn change_password(&mut self, password: UserPassword) {
        self.password = password;
        self.touch();
    }

    /// "First Last", falling back to the email when no name is on file.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.profile.first_name, &self.profile.last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();

        if parts.is_empty() {
            self.email.to_string()
        } else {
            parts.join(" ")
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn account() -> Account {
        let raw = RawPassword::new("pw123".to_string()).unwrap();
        Account::new(
            Email::new("a@x.com").unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
            AccountProfile::default(),
        )
    }

    #[test]
    fn test_apply_profile_keeps_absent_fields() {
        let mut account = account();
        account.apply_profile(AccountProfile {
            first_name: Some("Ana".to_string()),
            last_name: Some("Pérez".to_string()),
            national_id: None,
        });
        account.apply_profile(AccountProfile {
            first_name: None,
            last_name: Some("Torres".to_string()),
            national_id: None,
        });

        assert_eq!(account.profile.first_name.as_deref(), Some("Ana"));
        assert_eq!(account.profile.last_name.as_deref(), Some("Torres"));
        assert!(account.updated_at >= account.created_at);
    }

    #[test]
    fn test_display_name() {
        let mut account = account();
        assert_eq!(account.display_name(), "a@x.com");

        account.profile.first_name = Some("Ana".to_string());
        assert_eq!(account.display_name(), "Ana");

        account.profile.last_name = Some("Pérez".to_string());
        assert_eq!(account.display_name(), "Ana Pérez");
    }
}
