use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::CredentialError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const USERNAME_UNIQUE_CONSTRAINT: &str = "accounts_username_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = CredentialError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username).map_err(|e| {
            CredentialError::Internal(format!("Stored account {} is corrupt: {}", row.id, e))
        })?;

        Ok(Account {
            id: AccountId(row.id),
            username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn count_by_username(&self, username: &Username) -> Result<u64, CredentialError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CredentialError::Database(e.to_string()))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn insert(&self, account: NewAccount) -> Result<AccountId, CredentialError> {
        let id = AccountId::new();

        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.0)
        .bind(account.username.as_str())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::AlreadyExists(account.username.to_string());
                }
            }
            CredentialError::Database(e.to_string())
        })?;

        Ok(id)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, CredentialError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }
}
