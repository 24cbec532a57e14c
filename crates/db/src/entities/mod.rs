//! `SeaORM` entity definitions.

pub mod accounts;
pub mod transactions;
pub mod users;

pub mod prelude {
    //! Entity re-exports.
    pub use super::accounts::Entity as Accounts;
    pub use super::transactions::Entity as Transactions;
    pub use super::users::Entity as Users;
}
