use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use tokio::sync::Semaphore;

use crate::account::errors::CredentialError;
use crate::account::models::AccountId;
use crate::account::models::IssuedToken;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::account::models::VerifiedToken;
use crate::account::ports::AccountRepository;
use crate::account::ports::CredentialServicePort;

/// Domain service implementation for credential operations.
///
/// Holds only immutable state: the store handle, the authenticator (signing secret
/// and token lifetime) and the permits bounding concurrent Argon2 work.
pub struct CredentialService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    hashing_permits: Semaphore,
}

impl<AR> CredentialService<AR>
where
    AR: AccountRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hasher and token codec sharing the signing secret
    /// * `max_concurrent_hashes` - Upper bound on simultaneous hash computations
    pub fn new(
        repository: Arc<AR>,
        authenticator: Arc<Authenticator>,
        max_concurrent_hashes: usize,
    ) -> Self {
        Self {
            repository,
            authenticator,
            hashing_permits: Semaphore::new(max_concurrent_hashes.max(1)),
        }
    }

    /// Run password work on the blocking pool, at most `max_concurrent_hashes` at a time.
    async fn with_hasher<F, T>(&self, work: F) -> Result<T, CredentialError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let _permit = self
            .hashing_permits
            .acquire()
            .await
            .map_err(|e| CredentialError::Internal(format!("Hashing pool closed: {}", e)))?;

        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || work(&authenticator))
            .await
            .map_err(|e| CredentialError::Internal(format!("Hashing task failed: {}", e)))
    }
}

#[async_trait]
impl<AR> CredentialServicePort for CredentialService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AccountId, CredentialError> {
        let RegisterCommand {
            username,
            password,
            email,
        } = command;

        if self.repository.count_by_username(&username).await? > 0 {
            return Err(CredentialError::AlreadyExists(username.to_string()));
        }

        let password_hash = self
            .with_hasher(move |authenticator| authenticator.hash_password(password.expose()))
            .await?
            .map_err(|e| CredentialError::Internal(format!("Failed to hash password: {}", e)))?;

        // The store's unique constraint still rejects a concurrent duplicate here.
        let account_id = self
            .repository
            .insert(NewAccount {
                username: username.clone(),
                email,
                password_hash,
            })
            .await?;

        tracing::info!(
            username = %username,
            account_id = %account_id,
            "Account registered"
        );

        Ok(account_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, CredentialError> {
        let LoginCommand { username, password } = command;

        // No account can hold a username that fails validation.
        let account = match Username::new(username.clone()) {
            Ok(valid) => self.repository.find_by_username(&valid).await?,
            Err(_) => None,
        }
        .ok_or_else(|| CredentialError::NotFound(username.clone()))?;

        let account_id = account.id;
        let stored_hash = account.password_hash;
        let subject = account.username;

        let result = self
            .with_hasher(move |authenticator| {
                authenticator.authenticate(&password, &stored_hash, subject.as_str())
            })
            .await?
            .map_err(|e| {
                let error = CredentialError::from(e);
                match &error {
                    CredentialError::InvalidCredentials => {
                        tracing::warn!(username = %username, "Login rejected: incorrect password")
                    }
                    _ => tracing::error!(
                        username = %username,
                        account_id = %account_id,
                        error = %error,
                        "Login failed"
                    ),
                }
                error
            })?;

        tracing::info!(
            username = %username,
            account_id = %account_id,
            expires_at = %result.expires_at,
            "Access token issued"
        );

        Ok(IssuedToken {
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<VerifiedToken, CredentialError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token verification failed");
            CredentialError::from(e)
        })?;

        let expires_at = claims.expires_at().ok_or_else(|| {
            CredentialError::Internal(format!("Token expiry out of range: {}", claims.exp))
        })?;

        Ok(VerifiedToken {
            subject: claims.sub,
            expires_at,
        })
    }
}
