use super::money::{InvalidAmount, MINOR_UNIT_SCALE, from_minor_units, to_minor_units};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_whole_amount_to_minor_units() {
    assert_eq!(to_minor_units(dec!(1500)), Ok(150_000));
    assert_eq!(to_minor_units(dec!(1500.00)), Ok(150_000));
}

#[test]
fn test_fractional_amount_to_minor_units() {
    assert_eq!(to_minor_units(dec!(0.25)), Ok(25));
    assert_eq!(to_minor_units(dec!(99.9)), Ok(9_990));
}

#[test]
fn test_trailing_zeros_do_not_count_as_precision() {
    assert_eq!(to_minor_units(dec!(12.500)), Ok(1_250));
}

#[test]
fn test_too_precise_amount_rejected() {
    assert_eq!(
        to_minor_units(dec!(10.005)),
        Err(InvalidAmount::TooPrecise { scale: 3 })
    );
}

#[test]
fn test_out_of_range_amount_rejected() {
    assert_eq!(to_minor_units(Decimal::MAX), Err(InvalidAmount::OutOfRange));
}

#[test]
fn test_negative_amounts_convert() {
    // Sign checks belong to the ledger; conversion is exact either way.
    assert_eq!(to_minor_units(dec!(-1.50)), Ok(-150));
}

#[test]
fn test_from_minor_units_keeps_two_places() {
    let amount = from_minor_units(150_050);
    assert_eq!(amount, dec!(1500.50));
    assert_eq!(amount.scale(), MINOR_UNIT_SCALE);
}
