//! Structural validation of transfer requests.
//!
//! A [`Validator`] is an explicit value holding an ordered rule set per field.
//! It is built once at startup and handed to the transfer service; there is
//! no global registry.
//!
//! The rule set is configurable, but two checks are not: `amount` must be a
//! strictly positive value with at most two decimal places, and `type` must
//! name a [`TransactionType`]. A [`ValidatedTransfer`] cannot be built
//! otherwise, so these run after the rules whether or not the rule set
//! mentions those fields. A field already failed by a rule keeps the rule's
//! message.

use std::collections::BTreeMap;

use remit_shared::Money;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidateLength;

use crate::ledger::TransactionType;
use crate::transfer::{TransferRequest, ValidatedTransfer};

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-empty.
    Required,
    /// At least `n` characters.
    MinLength(u64),
    /// At most `n` characters.
    MaxLength(u64),
    /// One of a fixed set of values.
    OneOf(&'static [&'static str]),
    /// Strictly greater than zero.
    PositiveAmount,
}

impl Rule {
    fn check(self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Self::Required, FieldValue::Text(text)) => text.is_some_and(|t| !t.is_empty()),
            (Self::Required, FieldValue::Amount(amount)) => amount.is_some(),
            (Self::MinLength(n), FieldValue::Text(Some(text))) => {
                text.validate_length(Some(n), None, None)
            }
            (Self::MaxLength(n), FieldValue::Text(Some(text))) => {
                text.validate_length(None, Some(n), None)
            }
            (Self::OneOf(options), FieldValue::Text(Some(text))) => {
                options.contains(&text.as_str())
            }
            (Self::PositiveAmount, FieldValue::Amount(Some(amount))) => amount > Decimal::ZERO,
            // Absent values are the Required rule's concern.
            _ => true,
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Self::Required => format!("{field} is a required field"),
            Self::MinLength(n) => format!("{field} must be at least {n} characters long"),
            Self::MaxLength(n) => format!("{field} must be at most {n} characters long"),
            Self::OneOf(options) => {
                let quoted: Vec<String> = options.iter().map(|o| format!("'{o}'")).collect();
                format!("{field} must be either {}", quoted.join(" or "))
            }
            Self::PositiveAmount => format!("{field} must be a positive number"),
        }
    }
}

#[derive(Clone, Copy)]
enum FieldValue<'a> {
    Text(Option<&'a String>),
    Amount(Option<Decimal>),
}

/// Field-level validation failures keyed by JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Records a message for `field`, keeping the first one.
    pub fn add(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_insert(message);
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&joined.join("; "))
    }
}

/// Transfer request fields the validator knows how to read.
pub const TRANSFER_FIELDS: [&str; 6] = [
    "account_number",
    "username",
    "transaction_pin",
    "payment_reference",
    "amount",
    "type",
];

/// Explicitly constructed request validator.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Vec<(&'static str, Vec<Rule>)>,
}

impl Validator {
    /// Builds a validator from an ordered `(field, rules)` list.
    #[must_use]
    pub fn new(rules: Vec<(&'static str, Vec<Rule>)>) -> Self {
        Self { rules }
    }

    /// The rule set applied to fund-transfer requests.
    #[must_use]
    pub fn for_transfer_requests() -> Self {
        Self::new(vec![
            ("account_number", vec![Rule::Required, Rule::MinLength(10), Rule::MaxLength(10)]),
            ("username", vec![Rule::Required]),
            ("transaction_pin", vec![Rule::Required, Rule::MinLength(4), Rule::MaxLength(4)]),
            ("payment_reference", vec![Rule::Required, Rule::MinLength(1), Rule::MaxLength(255)]),
            ("amount", vec![Rule::Required, Rule::PositiveAmount]),
            ("type", vec![Rule::Required, Rule::OneOf(&["credit", "debit"])]),
        ])
    }

    /// Checks `request` and converts it into typed values.
    ///
    /// Every field is checked; for each field only the first failing rule is
    /// reported. The amount and type conversions described in the module
    /// docs apply even when the rule set omits those fields.
    pub fn validate(&self, request: &TransferRequest) -> Result<ValidatedTransfer, FieldErrors> {
        let mut errors = FieldErrors::default();

        for (field, rules) in &self.rules {
            let value = field_value(request, field);
            if let Some(rule) = rules.iter().find(|rule| !rule.check(value)) {
                errors.add(field, rule.message(field));
            }
        }

        let amount = match request.amount.map(Money::new) {
            Some(Ok(amount)) if amount.is_positive() => Some(amount),
            Some(Ok(_)) => {
                errors.add("amount", Rule::PositiveAmount.message("amount"));
                None
            }
            Some(Err(_)) => {
                errors.add("amount", "amount must have at most 2 decimal places".to_string());
                None
            }
            None => {
                errors.add("amount", Rule::Required.message("amount"));
                None
            }
        };

        let transaction_type = match request.transaction_type.as_deref() {
            Some(raw) => raw.parse::<TransactionType>().ok(),
            None => None,
        };
        if transaction_type.is_none() {
            errors.add("type", Rule::OneOf(&["credit", "debit"]).message("type"));
        }

        match (amount, transaction_type) {
            (Some(amount), Some(transaction_type)) if errors.is_empty() => Ok(ValidatedTransfer {
                account_number: request.account_number.clone().unwrap_or_default(),
                username: request.username.clone().unwrap_or_default(),
                transaction_pin: request.transaction_pin.clone().unwrap_or_default(),
                payment_reference: request.payment_reference.clone().unwrap_or_default(),
                amount,
                transaction_type,
            }),
            _ => Err(errors),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::for_transfer_requests()
    }
}

fn field_value<'a>(request: &'a TransferRequest, field: &str) -> FieldValue<'a> {
    match field {
        "account_number" => FieldValue::Text(request.account_number.as_ref()),
        "username" => FieldValue::Text(request.username.as_ref()),
        "transaction_pin" => FieldValue::Text(request.transaction_pin.as_ref()),
        "payment_reference" => FieldValue::Text(request.payment_reference.as_ref()),
        "amount" => FieldValue::Amount(request.amount),
        "type" => FieldValue::Text(request.transaction_type.as_ref()),
        _ => FieldValue::Text(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn valid_request() -> TransferRequest {
        TransferRequest {
            account_number: Some("0123456789".to_string()),
            username: Some("ada".to_string()),
            transaction_pin: Some("1234".to_string()),
            payment_reference: Some("pay-1".to_string()),
            amount: Some(dec!(100.00)),
            transaction_type: Some("debit".to_string()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let validated = Validator::for_transfer_requests()
            .validate(&valid_request())
            .unwrap();
        assert_eq!(validated.account_number, "0123456789");
        assert_eq!(validated.amount.to_string(), "100.00");
        assert_eq!(validated.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn test_empty_request_reports_every_field() {
        let errors = Validator::for_transfer_requests()
            .validate(&TransferRequest::default())
            .unwrap_err();

        assert_eq!(errors.len(), TRANSFER_FIELDS.len());
        for field in TRANSFER_FIELDS {
            assert_eq!(
                errors.get(field),
                Some(format!("{field} is a required field").as_str())
            );
        }
    }

    #[rstest]
    #[case("012345678", "account_number must be at least 10 characters long")]
    #[case("01234567890", "account_number must be at most 10 characters long")]
    #[case("", "account_number is a required field")]
    fn test_account_number_length(#[case] number: &str, #[case] expected: &str) {
        let mut request = valid_request();
        request.account_number = Some(number.to_string());
        let errors = Validator::for_transfer_requests().validate(&request).unwrap_err();
        assert_eq!(errors.get("account_number"), Some(expected));
        assert_eq!(errors.len(), 1);
    }

    #[rstest]
    #[case("123", "transaction_pin must be at least 4 characters long")]
    #[case("12345", "transaction_pin must be at most 4 characters long")]
    fn test_pin_length(#[case] pin: &str, #[case] expected: &str) {
        let mut request = valid_request();
        request.transaction_pin = Some(pin.to_string());
        let errors = Validator::for_transfer_requests().validate(&request).unwrap_err();
        assert_eq!(errors.get("transaction_pin"), Some(expected));
    }

    #[test]
    fn test_lengths_count_characters() {
        let mut request = valid_request();
        request.transaction_pin = Some("ñ€ü1".to_string());
        assert!(Validator::for_transfer_requests().validate(&request).is_ok());
    }

    #[test]
    fn test_payment_reference_too_long() {
        let mut request = valid_request();
        request.payment_reference = Some("r".repeat(256));
        let errors = Validator::for_transfer_requests().validate(&request).unwrap_err();
        assert_eq!(
            errors.get("payment_reference"),
            Some("payment_reference must be at most 255 characters long")
        );
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-5.00))]
    fn test_non_positive_amount(#[case] amount: Decimal) {
        let mut request = valid_request();
        request.amount = Some(amount);
        let errors = Validator::for_transfer_requests().validate(&request).unwrap_err();
        assert_eq!(errors.get("amount"), Some("amount must be a positive number"));
    }

    #[test]
    fn test_sub_cent_amount() {
        let mut request = valid_request();
        request.amount = Some(dec!(10.005));
        let errors = Validator::for_transfer_requests().validate(&request).unwrap_err();
        assert_eq!(
            errors.get("amount"),
            Some("amount must have at most 2 decimal places")
        );
    }

    #[rstest]
    #[case("refund")]
    #[case("DEBIT")]
    fn test_unknown_type(#[case] kind: &str) {
        let mut request = valid_request();
        request.transaction_type = Some(kind.to_string());
        let errors = Validator::for_transfer_requests().validate(&request).unwrap_err();
        assert_eq!(errors.get("type"), Some("type must be either 'credit' or 'debit'"));
    }

    #[test]
    fn test_custom_rule_set_is_honoured() {
        let validator = Validator::new(vec![("username", vec![Rule::Required, Rule::MinLength(5)])]);
        let errors = validator.validate(&valid_request()).unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("username must be at least 5 characters long")
        );
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::default();
        errors.add("amount", "amount is a required field".to_string());
        errors.add("amount", "ignored".to_string());
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"amount":"amount is a required field"}"#
        );
    }
}
