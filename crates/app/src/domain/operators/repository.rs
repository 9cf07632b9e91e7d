//! Operators Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::operators::models::{Operator, OperatorRole, OperatorUuid};

const CREATE_OPERATOR_SQL: &str = include_str!("sql/create_operator.sql");
const GET_OPERATOR_SQL: &str = include_str!("sql/get_operator.sql");
const FIND_OPERATOR_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_operator_by_token_hash.sql");
const LIST_OPERATORS_SQL: &str = include_str!("sql/list_operators.sql");
const REVOKE_OPERATOR_SQL: &str = include_str!("sql/revoke_operator.sql");
const REPLACE_TOKEN_HASH_SQL: &str = include_str!("sql/replace_token_hash.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOperatorsRepository;

impl PgOperatorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
        username: &str,
        role: OperatorRole,
        token_hash: &str,
    ) -> Result<Operator, sqlx::Error> {
        query_as::<Postgres, Operator>(CREATE_OPERATOR_SQL)
            .bind(operator.into_uuid())
            .bind(username)
            .bind(role.as_str())
            .bind(token_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
    ) -> Result<Operator, sqlx::Error> {
        query_as::<Postgres, Operator>(GET_OPERATOR_SQL)
            .bind(operator.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_operator_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<Operator>, sqlx::Error> {
        query_as::<Postgres, Operator>(FIND_OPERATOR_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_operators(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Operator>, sqlx::Error> {
        query_as::<Postgres, Operator>(LIST_OPERATORS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Returns `None` when no active operator has this UUID.
    pub(crate) async fn revoke_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
    ) -> Result<Option<Operator>, sqlx::Error> {
        query_as::<Postgres, Operator>(REVOKE_OPERATOR_SQL)
            .bind(operator.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `None` when no active operator has this UUID.
    pub(crate) async fn replace_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
        token_hash: &str,
    ) -> Result<Option<Operator>, sqlx::Error> {
        query_as::<Postgres, Operator>(REPLACE_TOKEN_HASH_SQL)
            .bind(operator.into_uuid())
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Operator {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: OperatorUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            role: role.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
