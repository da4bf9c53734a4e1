//! Fee calculation
//!
//! One flat rate with a floor and a cap. Small transfers pay the floor,
//! large transfers pay the cap, everything in between pays the rate.

use openremit_types::round_money;
use rust_decimal::Decimal;

use crate::config::FeeSchedule;

/// Fee for a send amount under the given schedule.
///
/// `amount * rate` clamped to `[minimum, maximum]`, rounded to currency
/// precision.
pub fn transfer_fee(amount: Decimal, schedule: &FeeSchedule) -> Decimal {
    let raw = amount * schedule.rate;
    round_money(raw.max(schedule.minimum).min(schedule.maximum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fee_schedule_examples() {
        let schedule = FeeSchedule::default();

        // Floor: 1% of 100 is 1.00, charged 5.00.
        assert_eq!(transfer_fee(dec!(100), &schedule), dec!(5.00));
        // Exactly at the floor boundary.
        assert_eq!(transfer_fee(dec!(500), &schedule), dec!(5.00));
        // Plain rate inside the band.
        assert_eq!(transfer_fee(dec!(1000), &schedule), dec!(10.00));
        assert_eq!(transfer_fee(dec!(2000), &schedule), dec!(20.00));
        // Cap: 1% of 10000 is 100.00, charged 50.00.
        assert_eq!(transfer_fee(dec!(10000), &schedule), dec!(50.00));
        assert_eq!(transfer_fee(dec!(1_000_000), &schedule), dec!(50.00));
    }

    #[test]
    fn test_fee_rounds_to_currency_precision() {
        let schedule = FeeSchedule::default();
        // 1% of 550.55 is 5.5055, rounded midpoint-away to 5.51.
        assert_eq!(transfer_fee(dec!(550.55), &schedule), dec!(5.51));
    }

    proptest! {
        #[test]
        fn fee_always_inside_the_band(cents in 1i64..=10_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let schedule = FeeSchedule::default();
            let fee = transfer_fee(amount, &schedule);

            prop_assert!(fee >= schedule.minimum);
            prop_assert!(fee <= schedule.maximum);
        }

        #[test]
        fn fee_matches_clamped_rate(cents in 1i64..=10_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let schedule = FeeSchedule::default();
            let unclamped = amount * schedule.rate;

            let expected = round_money(
                unclamped.max(schedule.minimum).min(schedule.maximum),
            );
            prop_assert_eq!(transfer_fee(amount, &schedule), expected);
        }
    }
}
