use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::CredentialError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

/// Process-local account store keyed by username.
///
/// Uniqueness is checked and the record inserted under one write lock.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Username, Account>>,
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

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn count_by_username(&self, username: &Username) -> Result<u64, CredentialError> {
        Ok(u64::from(self.accounts.read().await.contains_key(username)))
    }

    async fn insert(&self, account: NewAccount) -> Result<AccountId, CredentialError> {
        let mut accounts = self.accounts.write().await;

        match accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(CredentialError::AlreadyExists(account.username.to_string())),
            Entry::Vacant(slot) => {
                let id = AccountId::new();
                slot.insert(Account {
                    id,
                    username: account.username,
                    email: account.email,
                    password_hash: account.password_hash,
                    created_at: Utc::now(),
                });
                Ok(id)
            }
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, CredentialError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }
}
