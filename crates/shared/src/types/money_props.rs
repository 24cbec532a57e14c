//! Property-based tests for exact money arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::money::Money;

/// Strategy to generate amounts from 0.00 to 10,000,000.00.
fn cents() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

fn money(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Addition matches integer cent arithmetic exactly.
    #[test]
    fn prop_add_matches_cents(a in cents(), b in cents()) {
        let sum = money(a).add_exact(money(b), Money::SCALE).unwrap();
        prop_assert_eq!(sum.amount(), Decimal::new(a + b, 2));
        prop_assert_eq!(sum.amount().scale(), Money::SCALE);
    }

    /// Subtracting what was added restores the original amount.
    #[test]
    fn prop_sub_inverts_add(a in cents(), b in cents()) {
        let original = money(a);
        let round_trip = original
            .add_exact(money(b), Money::SCALE)
            .and_then(|sum| sum.sub_exact(money(b), Money::SCALE))
            .unwrap();
        prop_assert_eq!(round_trip, original);
    }

    /// Ordering agrees with the cent values.
    #[test]
    fn prop_ordering_matches_cents(a in cents(), b in cents()) {
        prop_assert_eq!(money(a).cmp(&money(b)), a.cmp(&b));
    }
}
