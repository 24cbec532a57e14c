//! Transaction repository. Rows are inserted once and never updated.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use remit_core::ledger::{NewTransaction, Transaction, TransactionType};
use remit_core::store::{StoreError, TransactionStore};
use remit_shared::types::{AccountId, TransactionId};

use super::{store_error, to_money};
use crate::entities::transactions;

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: TransactionId) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Finds a transaction by the caller's payment reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_payment_ref(
        &self,
        payment_reference: &str,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::PaymentReference.eq(payment_reference))
            .one(&self.db)
            .await
    }

    /// Inserts a transaction row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; a reused payment or settlement
    /// reference surfaces as a unique constraint violation.
    pub async fn insert(&self, transaction: &NewTransaction) -> Result<transactions::Model, DbErr> {
        transactions::ActiveModel {
            id: NotSet,
            account_id: Set(transaction.account_id.into_inner()),
            reference: Set(transaction.settlement_reference.clone()),
            payment_reference: Set(transaction.payment_reference.clone()),
            amount: Set(transaction.amount.amount()),
            transaction_type: Set(transaction.transaction_type.as_str().to_string()),
            success: Set(transaction.success),
            transaction_time: Set(transaction.transaction_time.fixed_offset()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }
}

fn to_transaction(model: transactions::Model) -> Result<Transaction, StoreError> {
    let transaction_type = model
        .transaction_type
        .parse::<TransactionType>()
        .map_err(StoreError::Database)?;

    Ok(Transaction {
        id: TransactionId::new(model.id),
        account_id: AccountId::new(model.account_id),
        payment_reference: model.payment_reference,
        settlement_reference: model.reference,
        amount: to_money(model.amount, "amount")?,
        transaction_type,
        success: model.success,
        transaction_time: model.transaction_time.with_timezone(&Utc),
    })
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<Transaction>, StoreError> {
        self.find_by_payment_ref(payment_reference)
            .await
            .map_err(|e| store_error(&e))?
            .map(to_transaction)
            .transpose()
    }

    async fn save_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let model = self
            .insert(&transaction)
            .await
            .map_err(|e| store_error(&e))?;
        Ok(Transaction::from_new(TransactionId::new(model.id), transaction))
    }
}
