//! Account repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use villa_core::auth::{Account, AccountStore, NewAccount, UserRole};
use villa_core::store::StoreError;
use villa_shared::types::AccountId;

use super::store_error;
use crate::entities::accounts;

/// Account repository backing the credential store.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let now = Utc::now();
        let model = accounts::ActiveModel {
            id: NotSet,
            username: Set(account.username),
            password_hash: Set(account.password_hash),
            role: Set(account.role.as_str().to_string()),
            recovery_question: Set(account.recovery_question),
            recovery_answer_hash: Set(account.recovery_answer_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;

        to_account(model)
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(to_account)
            .transpose()
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(to_account)
            .transpose()
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn update_password_hash_if_unchanged(
        &self,
        id: AccountId,
        expected_updated_at: DateTime<Utc>,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id.into_inner()))
            .filter(accounts::Column::UpdatedAt.eq(expected_updated_at))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn update_role(&self, id: AccountId, role: UserRole) -> Result<bool, StoreError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::Role, Expr::value(role.as_str()))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected > 0)
    }
}

fn to_account(model: accounts::Model) -> Result<Account, StoreError> {
    let role = UserRole::parse(&model.role).ok_or_else(|| {
        StoreError::Database(format!(
            "account {} has unknown role {:?}",
            model.id, model.role
        ))
    })?;

    Ok(Account {
        id: AccountId::new(model.id),
        username: model.username,
        password_hash: model.password_hash,
        role,
        recovery_question: model.recovery_question,
        recovery_answer_hash: model.recovery_answer_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
