//! User repository for database operations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use remit_core::ledger::{Account, User};
use remit_core::store::{StoreError, UserStore};

use super::{store_error, to_account, to_user};
use crate::entities::{accounts, users};

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a duplicate username.
    pub async fn create(&self, username: &str, transaction_pin: &str) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        users::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            transaction_pin: Set(transaction_pin.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds an account together with its owning user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_account(
        &self,
        account_number: &str,
    ) -> Result<Option<(users::Model, accounts::Model)>, DbErr> {
        let found = accounts::Entity::find()
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(account, user)| user.map(|u| (u, account))))
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_user_and_account_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<(User, Account)>, StoreError> {
        match self
            .find_with_account(account_number)
            .await
            .map_err(|e| store_error(&e))?
        {
            Some((user, account)) => Ok(Some((to_user(user), to_account(account)?))),
            None => Ok(None),
        }
    }
}
