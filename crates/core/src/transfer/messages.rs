//! Fixed response vocabulary. Callers never see any other message text.

/// Request body was not valid JSON for a transfer.
pub const INVALID_JSON_REQUEST: &str = "invalid json request passed";
/// Payment reference already recorded.
pub const NOT_UNIQUE_REFERENCE: &str = "transaction reference is not unique";
/// No transfer recorded under the reference.
pub const TRANSACTION_NOT_FOUND: &str = "transaction not found";
/// Internal failure.
pub const APPLICATION_ERROR: &str = "an application error occurred";
/// Gateway could not settle or be reached.
pub const UNABLE_TO_COMPLETE_TRANSACTION: &str = "unable to complete transaction";
/// Unknown route.
pub const RESOURCE_NOT_FOUND: &str = "resource not found";
/// Known route, wrong method.
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";
/// Transfer or status query succeeded.
pub const SUCCESSFUL_TRANSACTION: &str = "transaction is successful";
/// Field validation failed.
pub const BAD_REQUEST: &str = "bad request";
/// Account number did not resolve to a user and account.
pub const USER_OR_ACCOUNT_NOT_FOUND: &str = "user or account not found";
/// PIN mismatch.
pub const INCORRECT_TRANSACTION_PIN: &str = "incorrect user transaction PIN";
/// Debit exceeds balance.
pub const INSUFFICIENT_FUNDS: &str = "insufficient funds";
