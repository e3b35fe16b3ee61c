//! Order validator: the first, stateless gate of the pipeline.
//!
//! Checks each order's numeric and structural invariants without touching
//! chain state. The same order always yields the same verdict.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. quantity set and non-negative
//! 2. price set and non-negative
//! 3. asset denom non-empty
//! 4. price denom non-empty
//! 5. the field required by the order type (if any) set and non-negative

use rust_decimal::Decimal;
use tickgate_types::{
    ConditionalField, OrderField, OrderRequest, OrderViolation, Result, TickgateError,
};

/// Validate a single order.
///
/// # Errors
/// Returns the first [`OrderViolation`] found.
pub fn validate_order(order: &OrderRequest) -> std::result::Result<(), OrderViolation> {
    check_non_negative(OrderField::Quantity, order.quantity, "invalid order quantity")?;
    check_non_negative(OrderField::Price, order.price, "invalid order price")?;
    if order.asset_denom.is_empty() {
        return Err(OrderViolation::new(
            OrderField::AssetDenom,
            "invalid order, asset denom is empty",
        ));
    }
    if order.price_denom.is_empty() {
        return Err(OrderViolation::new(
            OrderField::PriceDenom,
            "invalid order, price denom is empty",
        ));
    }
    match order.order_type.required_field() {
        Some(ConditionalField::Nominal) => check_non_negative(
            OrderField::Nominal,
            order.nominal,
            "invalid nominal value for market by value order",
        ),
        Some(ConditionalField::TriggerPrice) => check_non_negative(
            OrderField::TriggerPrice,
            order.trigger_price,
            "invalid trigger price for stop loss/limit order",
        ),
        None => Ok(()),
    }
}

/// Validate every order of a batch, in submission order.
///
/// # Errors
/// Returns `EmptyBatch` for an empty slice, otherwise `InvalidOrder` carrying
/// the index of the first violating order.
pub fn validate_orders(orders: &[OrderRequest]) -> Result<()> {
    if orders.is_empty() {
        return Err(TickgateError::EmptyBatch);
    }
    for (index, order) in orders.iter().enumerate() {
        validate_order(order).map_err(|violation| violation.at_index(index))?;
    }
    Ok(())
}

fn check_non_negative(
    field: OrderField,
    value: Option<Decimal>,
    what: &str,
) -> std::result::Result<(), OrderViolation> {
    match value {
        None => Err(OrderViolation::new(field, format!("{what}: <nil>"))),
        Some(value) if value < Decimal::ZERO => {
            Err(OrderViolation::new(field, format!("{what}: {value}")))
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use tickgate_types::*;

    use super::*;

    fn make_long(price: Decimal, qty: Decimal) -> OrderRequest {
        OrderRequest::dummy_limit(PositionDirection::Long, price, qty)
    }

    fn field_of(order: &OrderRequest) -> OrderField {
        validate_order(order).unwrap_err().field
    }

    #[test]
    fn valid_order_passes() {
        let order = make_long(Decimal::new(100, 0), Decimal::ONE);
        assert!(validate_order(&order).is_ok());
    }

    #[test]
    fn zero_price_and_quantity_pass() {
        let order = make_long(Decimal::ZERO, Decimal::ZERO);
        assert!(validate_order(&order).is_ok());
    }

    #[test]
    fn unset_quantity_rejected() {
        let mut order = make_long(Decimal::ONE, Decimal::ONE);
        order.quantity = None;
        assert_eq!(field_of(&order), OrderField::Quantity);
    }

    #[test]
    fn negative_quantity_rejected() {
        let order = make_long(Decimal::ONE, Decimal::NEGATIVE_ONE);
        let violation = validate_order(&order).unwrap_err();
        assert_eq!(violation.field, OrderField::Quantity);
        assert!(violation.reason.contains("-1"));
    }

    #[test]
    fn unset_price_rejected() {
        let mut order = make_long(Decimal::ONE, Decimal::ONE);
        order.price = None;
        assert_eq!(field_of(&order), OrderField::Price);
    }

    #[test]
    fn negative_price_rejected() {
        let order = make_long(Decimal::new(-5, 1), Decimal::ONE);
        assert_eq!(field_of(&order), OrderField::Price);
    }

    #[test]
    fn quantity_checked_before_price() {
        let mut order = make_long(Decimal::NEGATIVE_ONE, Decimal::NEGATIVE_ONE);
        order.asset_denom.clear();
        assert_eq!(field_of(&order), OrderField::Quantity);
    }

    #[test]
    fn empty_denoms_rejected() {
        let mut order = make_long(Decimal::ONE, Decimal::ONE);
        order.asset_denom.clear();
        assert_eq!(field_of(&order), OrderField::AssetDenom);

        let mut order = make_long(Decimal::ONE, Decimal::ONE);
        order.price_denom.clear();
        assert_eq!(field_of(&order), OrderField::PriceDenom);
    }

    #[test]
    fn value_order_requires_nominal() {
        let mut order = OrderRequest::dummy_of_type(OrderType::FokMarketByValue);
        assert!(validate_order(&order).is_ok());

        order.nominal = None;
        assert_eq!(field_of(&order), OrderField::Nominal);

        order.nominal = Some(Decimal::NEGATIVE_ONE);
        assert_eq!(field_of(&order), OrderField::Nominal);
    }

    #[test]
    fn stop_orders_require_trigger_price() {
        for order_type in [OrderType::StopLoss, OrderType::StopLimit] {
            let mut order = OrderRequest::dummy_of_type(order_type);
            assert!(validate_order(&order).is_ok());

            order.trigger_price = None;
            assert_eq!(field_of(&order), OrderField::TriggerPrice);

            order.trigger_price = Some(Decimal::new(-1, 2));
            assert_eq!(field_of(&order), OrderField::TriggerPrice);
        }
    }

    #[test]
    fn other_types_ignore_conditional_fields() {
        for order_type in [
            OrderType::Limit,
            OrderType::Market,
            OrderType::Liquidation,
            OrderType::FokMarket,
        ] {
            let mut order = OrderRequest::dummy_of_type(order_type);
            order.nominal = Some(Decimal::NEGATIVE_ONE);
            order.trigger_price = None;
            assert!(validate_order(&order).is_ok(), "{order_type} should pass");
        }
    }

    #[test]
    fn validation_is_repeatable() {
        let mut bad = make_long(Decimal::ONE, Decimal::ONE);
        bad.price = Some(Decimal::NEGATIVE_ONE);
        let good = make_long(Decimal::ONE, Decimal::ONE);
        assert_eq!(validate_order(&bad), validate_order(&bad));
        assert_eq!(validate_order(&good), validate_order(&good));
    }

    #[test]
    fn empty_batch_rejected() {
        let err = validate_orders(&[]).unwrap_err();
        assert!(matches!(err, TickgateError::EmptyBatch));
    }

    #[test]
    fn batch_reports_first_failing_index() {
        let mut second = make_long(Decimal::ONE, Decimal::ONE);
        second.price = None;
        let mut third = make_long(Decimal::ONE, Decimal::ONE);
        third.quantity = None;
        let orders = vec![make_long(Decimal::ONE, Decimal::ONE), second, third];

        let err = validate_orders(&orders).unwrap_err();
        assert!(
            matches!(
                err,
                TickgateError::InvalidOrder {
                    index: 1,
                    field: OrderField::Price,
                    ..
                }
            ),
            "Got: {err:?}"
        );
    }
}
