use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{AppError, Result};
use crate::types::{OrderReceipt, OrderRequest};

pub const AGE_VERIFICATION_REQUIRED: &str = "Age verification required";
pub const INVALID_PRICE_OR_QUANTITY: &str = "Invalid price or quantity";
pub const ORDER_PLACED: &str = "Order placed successfully";

/// Checks an order request. Age verification is checked before price/quantity.
pub fn validate_order(req: &OrderRequest) -> Result<()> {
    if !req.age_verified {
        return Err(AppError::Validation(AGE_VERIFICATION_REQUIRED.to_string()));
    }
    let positive = |v: f64| !v.is_nan() && v > 0.0;
    if !positive(req.price) || !positive(req.quantity) {
        return Err(AppError::Validation(INVALID_PRICE_OR_QUANTITY.to_string()));
    }
    Ok(())
}

/// Order stub: validates, then fabricates an id. Nothing is recorded or
/// matched against any book.
pub fn place_order<R: Rng + ?Sized>(
    req: &OrderRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<OrderReceipt> {
    validate_order(req)?;
    Ok(OrderReceipt {
        success: true,
        order_id: Some(format!("order-{}-{}", now.timestamp_millis(), rng.gen_range(0..1000))),
        message: Some(ORDER_PLACED.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderSide;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(age_verified: bool, price: f64, quantity: f64) -> OrderRequest {
        OrderRequest {
            product_id: "opus-one-2018".to_string(),
            user_id: "user-7".to_string(),
            order_type: OrderSide::Bid,
            price,
            quantity,
            age_verified,
            shipping_state: "CA".to_string(),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unverified_age_fails_regardless_of_price() {
        let mut rng = StdRng::seed_from_u64(1);
        for (price, qty) in [(100.0, 1.0), (0.0, 0.0), (-5.0, 3.0), (100.0, 1.5)] {
            let err = place_order(&request(false, price, qty), Utc::now(), &mut rng).unwrap_err();
            assert_eq!(message(err), AGE_VERIFICATION_REQUIRED);
        }
    }

    #[test]
    fn non_positive_price_or_quantity_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        for (price, qty) in [
            (0.0, 1.0),
            (-1.0, 1.0),
            (100.0, 0.0),
            (100.0, -2.0),
            (f64::NAN, 1.0),
            (100.0, f64::NAN),
        ] {
            let err = place_order(&request(true, price, qty), Utc::now(), &mut rng).unwrap_err();
            assert_eq!(message(err), INVALID_PRICE_OR_QUANTITY);
        }
    }

    #[test]
    fn fractional_quantity_is_a_valid_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let receipt = place_order(&request(true, 99.5, 1.5), Utc::now(), &mut rng).unwrap();
        assert!(receipt.success);
    }

    #[test]
    fn valid_order_gets_timestamped_id() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        let receipt = place_order(&request(true, 420.0, 2.0), now, &mut rng).unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.message.as_deref(), Some(ORDER_PLACED));
        let id = receipt.order_id.unwrap();
        let prefix = format!("order-{}-", now.timestamp_millis());
        assert!(id.starts_with(&prefix), "{id}");
        let suffix: u32 = id[prefix.len()..].parse().unwrap();
        assert!(suffix < 1000);
    }
}
