use async_trait::async_trait;

use crate::account::errors::CredentialError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::IssuedToken;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::account::models::VerifiedToken;

/// Port for credential lifecycle operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username, password and email
    ///
    /// # Returns
    /// Identifier the store assigned to the account
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `Database` - Store operation failed
    /// * `Internal` - Password hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<AccountId, CredentialError>;

    /// Verify a username/password pair and issue an access token.
    ///
    /// # Errors
    /// * `NotFound` - No account with this username
    /// * `InvalidCredentials` - Password does not match
    /// * `Database` - Store operation failed
    /// * `Internal` - Stored hash unreadable or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, CredentialError>;

    /// Verify a bearer token and extract its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `Unauthenticated` - Wrong algorithm, bad signature or expired
    /// * `Internal` - Token lacks its subject
    async fn verify_token(&self, token: &str) -> Result<VerifiedToken, CredentialError>;
}

/// Persistence operations for account records.
///
/// Implementations must give read-your-writes consistency for a single record and
/// must refuse a second record with the same username.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Count accounts registered under `username` (0 or 1).
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn count_by_username(&self, username: &Username) -> Result<u64, CredentialError>;

    /// Persist a new account.
    ///
    /// # Returns
    /// Assigned account identifier
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `Database` - Store operation failed
    async fn insert(&self, account: NewAccount) -> Result<AccountId, CredentialError>;

    /// Retrieve an account by username.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, CredentialError>;
}
