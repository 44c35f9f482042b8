//! In-memory account repository
//!
//! Mirrors the PostgreSQL constraints that matter to callers (unique email).
//! Enabled for tests and for dependent crates through the `memory` feature.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::AccountId;
use tokio::sync::RwLock;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::DuplicateIdentity);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self.accounts.read().await.get(account_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.accounts.read().await.values().any(|a| &a.email == email))
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        if let Some(stored) = self.accounts.write().await.get_mut(&account.account_id) {
            *stored = account.clone();
        }
        Ok(())
    }

    async fn delete(&self, account_id: &AccountId) -> AuthResult<bool> {
        Ok(self.accounts.write().await.remove(account_id).is_some())
    }
}
