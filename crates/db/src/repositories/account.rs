//! Account repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, TransactionTrait,
};
use tracing::{debug, warn};

use remit_core::ledger::Account;
use remit_core::store::{AccountStore, StoreError};
use remit_shared::Money;
use remit_shared::types::UserId;

use super::{store_error, to_account};
use crate::entities::accounts;

/// Account repository.
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

    /// Finds an account by account number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await
    }

    /// Opens an account for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a duplicate account
    /// number.
    pub async fn create(
        &self,
        user_id: UserId,
        account_number: &str,
        opening_balance: Money,
    ) -> Result<accounts::Model, DbErr> {
        let now = Utc::now().into();
        accounts::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.into_inner()),
            account_number: Set(account_number.to_string()),
            balance: Set(opening_balance.amount()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Writes the balance and modification time in one database transaction,
    /// provided the stored balance still equals `previous_balance`.
    ///
    /// # Errors
    ///
    /// Returns [`DbErr::RecordNotUpdated`] if the account does not exist or
    /// its balance changed since it was read, or any database error.
    pub async fn save_balance(&self, account: &Account, previous_balance: Money) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::Balance, Expr::value(account.balance().amount()))
            .col_expr(
                accounts::Column::UpdatedAt,
                Expr::value(account.updated_at().fixed_offset()),
            )
            .filter(accounts::Column::Id.eq(account.id.into_inner()))
            .filter(accounts::Column::Balance.eq(previous_balance.amount()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            warn!(
                account_id = %account.id,
                previous_balance = %previous_balance,
                "Account balance changed since it was read"
            );
            return Err(DbErr::RecordNotUpdated);
        }

        txn.commit().await?;
        debug!(account_id = %account.id, balance = %account.balance(), "Account balance saved");
        Ok(())
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn get_account_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_by_account_number(account_number)
            .await
            .map_err(|e| store_error(&e))?
            .map(to_account)
            .transpose()
    }

    async fn update_account(
        &self,
        account: &Account,
        previous_balance: Money,
    ) -> Result<(), StoreError> {
        self.save_balance(account, previous_balance)
            .await
            .map_err(|e| store_error(&e))
    }
}
