//! Operators service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::operators::{
        errors::OperatorsServiceError,
        models::{IssuedOperator, NewOperator, Operator, OperatorUuid},
        repository::PgOperatorsRepository,
        token::{generate_token, hash_token},
    },
};

#[derive(Debug, Clone)]
pub struct PgOperatorsService {
    db: Db,
    repository: PgOperatorsRepository,
}

impl PgOperatorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOperatorsRepository::new(),
        }
    }
}

#[async_trait]
impl OperatorsService for PgOperatorsService {
    async fn create_operator(
        &self,
        operator: NewOperator,
    ) -> Result<IssuedOperator, OperatorsServiceError> {
        let username = operator.username.trim();

        if username.is_empty() {
            return Err(OperatorsServiceError::Validation(
                "username must not be empty",
            ));
        }

        let token = generate_token();

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_operator(
                &mut tx,
                OperatorUuid::new(),
                username,
                operator.role,
                &hash_token(&token),
            )
            .await?;

        tx.commit().await?;

        info!(operator = %created.uuid, role = %created.role, "operator created");

        Ok(IssuedOperator {
            operator: created,
            token,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<Operator, OperatorsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let operator = self
            .repository
            .find_operator_by_token_hash(&mut tx, &hash_token(token))
            .await?
            .ok_or(OperatorsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(operator)
    }

    async fn get_operator(&self, operator: OperatorUuid) -> Result<Operator, OperatorsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let operator = self.repository.get_operator(&mut tx, operator).await?;

        tx.commit().await?;

        Ok(operator)
    }

    async fn list_operators(&self) -> Result<Vec<Operator>, OperatorsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let operators = self.repository.list_operators(&mut tx).await?;

        tx.commit().await?;

        Ok(operators)
    }

    async fn revoke_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Operator, OperatorsServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self
            .repository
            .revoke_operator(&mut tx, operator)
            .await?
            .ok_or(OperatorsServiceError::NotFound)?;

        tx.commit().await?;

        info!(%operator, "operator revoked");

        Ok(revoked)
    }

    async fn rotate_token(
        &self,
        operator: OperatorUuid,
    ) -> Result<IssuedOperator, OperatorsServiceError> {
        let token = generate_token();

        let mut tx = self.db.begin().await?;

        let rotated = self
            .repository
            .replace_token_hash(&mut tx, operator, &hash_token(&token))
            .await?
            .ok_or(OperatorsServiceError::NotFound)?;

        tx.commit().await?;

        info!(%operator, "operator token rotated");

        Ok(IssuedOperator {
            operator: rotated,
            token,
        })
    }
}

#[automock]
#[async_trait]
pub trait OperatorsService: Send + Sync {
    /// Creates an operator and issues its API token.
    ///
    /// The raw token is only ever returned here.
    async fn create_operator(
        &self,
        operator: NewOperator,
    ) -> Result<IssuedOperator, OperatorsServiceError>;

    /// Resolve the operator owning a raw API token.
    async fn authenticate(&self, token: &str) -> Result<Operator, OperatorsServiceError>;

    /// Retrieve a single operator.
    async fn get_operator(&self, operator: OperatorUuid) -> Result<Operator, OperatorsServiceError>;

    /// Every operator, revoked ones included, ordered by username.
    async fn list_operators(&self) -> Result<Vec<Operator>, OperatorsServiceError>;

    /// Withdraw an active operator's access. Past orders keep their cashier.
    async fn revoke_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Operator, OperatorsServiceError>;

    /// Replace an active operator's token, invalidating the old one.
    async fn rotate_token(
        &self,
        operator: OperatorUuid,
    ) -> Result<IssuedOperator, OperatorsServiceError>;
}
