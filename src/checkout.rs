//! Hosted checkout pass-through.
//!
//! The storefront never touches card data: [`place_order`] hands the cart
//! total and the buyer's contact details to a [`HostedCheckout`] widget
//! and reacts to what the widget reports. The cart is cleared only after
//! the widget reports a payment; there is no server-side verification of
//! that payment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use vriksha_core::session::StorefrontSession;

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("the cart is empty")]
    EmptyCart,
    #[error("invalid checkout form: {0}")]
    InvalidForm(&'static str),
    #[error("order total {0} cannot be charged")]
    AmountOutOfRange(Decimal),
    #[error("payment was dismissed")]
    Dismissed,
    #[error("payment failed: {0}")]
    PaymentFailed(String),
}

/// Buyer details entered on the checkout page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.name.trim().is_empty() {
            return Err(CheckoutError::InvalidForm("name is required"));
        }
        if !self.email.contains('@') {
            return Err(CheckoutError::InvalidForm("email must contain '@'"));
        }
        if self.address.trim().is_empty() {
            return Err(CheckoutError::InvalidForm("address is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// What the hosted widget is opened with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    /// Total in the currency's minor unit (cents, paise).
    pub amount_minor: i64,
    pub currency: String,
    pub prefill: Prefill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Paid { payment_id: String },
    Dismissed,
    Failed(String),
}

/// A third-party payment widget.
#[async_trait]
pub trait HostedCheckout: Send + Sync {
    async fn open(&self, request: &CheckoutRequest) -> CheckoutOutcome;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub amount: Decimal,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
}

fn to_minor_units(amount: Decimal) -> Result<i64, CheckoutError> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(CheckoutError::AmountOutOfRange(amount))
}

/// Build the widget request for the session's cart.
pub fn build_request(
    session: &StorefrontSession,
    form: &CheckoutForm,
    currency: &str,
) -> Result<CheckoutRequest, CheckoutError> {
    if session.cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    form.validate()?;

    Ok(CheckoutRequest {
        amount_minor: to_minor_units(session.cart.total_price())?,
        currency: currency.to_uppercase(),
        prefill: Prefill {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
        },
    })
}

/// Charge the cart through `widget`. On payment the cart is cleared and a
/// confirmation returned; any other outcome leaves the cart as it was.
pub async fn place_order(
    session: &mut StorefrontSession,
    form: &CheckoutForm,
    widget: &dyn HostedCheckout,
    currency: &str,
) -> Result<OrderConfirmation, CheckoutError> {
    let request = build_request(session, form, currency)?;

    match widget.open(&request).await {
        CheckoutOutcome::Paid { payment_id } => {
            let confirmation = OrderConfirmation {
                order_id: Uuid::new_v4().to_string(),
                payment_id,
                amount: session.cart.total_price(),
                item_count: session.cart.total_item_count(),
                placed_at: Utc::now(),
            };
            session.cart.clear();
            tracing::info!(
                order_id = %confirmation.order_id,
                amount_minor = request.amount_minor,
                "order placed"
            );
            Ok(confirmation)
        }
        CheckoutOutcome::Dismissed => Err(CheckoutError::Dismissed),
        CheckoutOutcome::Failed(reason) => {
            tracing::warn!(reason = %reason, "payment failed");
            Err(CheckoutError::PaymentFailed(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use vriksha_core::catalog;

    struct Widget {
        outcome: CheckoutOutcome,
        seen: Mutex<Option<CheckoutRequest>>,
    }

    impl Widget {
        fn new(outcome: CheckoutOutcome) -> Self {
            Self {
                outcome,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl HostedCheckout for Widget {
        async fn open(&self, request: &CheckoutRequest) -> CheckoutOutcome {
            *self.seen.lock().unwrap() = Some(request.clone());
            self.outcome.clone()
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "+91 90000 00000".into(),
            address: "12 Garden Lane".into(),
        }
    }

    fn session_with_plants() -> StorefrontSession {
        let mut session = StorefrontSession::new();
        session.cart.add_product(&catalog::find(3).unwrap(), 3);
        session.cart.add_product(&catalog::find(6).unwrap(), 1);
        session
    }

    #[tokio::test]
    async fn test_paid_order_clears_cart() {
        let mut session = session_with_plants();
        let widget = Widget::new(CheckoutOutcome::Paid {
            payment_id: "pay_123".into(),
        });

        let confirmation = place_order(&mut session, &form(), &widget, "inr").await.unwrap();
        assert_eq!(confirmation.payment_id, "pay_123");
        assert_eq!(confirmation.amount, Decimal::from(95));
        assert_eq!(confirmation.item_count, 4);
        assert!(session.cart.is_empty());

        let seen = widget.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.amount_minor, 9500);
        assert_eq!(seen.currency, "INR");
        assert_eq!(seen.prefill.phone, "+91 90000 00000");
    }

    #[tokio::test]
    async fn test_dismissed_keeps_cart() {
        let mut session = session_with_plants();
        let widget = Widget::new(CheckoutOutcome::Dismissed);

        let err = place_order(&mut session, &form(), &widget, "USD").await.unwrap_err();
        assert_eq!(err, CheckoutError::Dismissed);
        assert_eq!(session.cart.total_item_count(), 4);
    }

    #[tokio::test]
    async fn test_failed_payment_keeps_cart() {
        let mut session = session_with_plants();
        let widget = Widget::new(CheckoutOutcome::Failed("card declined".into()));

        let err = place_order(&mut session, &form(), &widget, "USD").await.unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentFailed(_)));
        assert_eq!(session.cart.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_never_opens_widget() {
        let mut session = StorefrontSession::new();
        let widget = Widget::new(CheckoutOutcome::Paid {
            payment_id: "unused".into(),
        });

        let err = place_order(&mut session, &form(), &widget, "USD").await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert!(widget.seen.lock().unwrap().is_none());
    }

    #[test]
    fn test_form_validation() {
        assert!(form().validate().is_ok());
        let missing_address = CheckoutForm {
            address: " ".into(),
            ..form()
        };
        assert!(matches!(
            missing_address.validate(),
            Err(CheckoutError::InvalidForm(_))
        ));
        let bad_email = CheckoutForm {
            email: "asha".into(),
            ..form()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_minor_units_round_half_away() {
        assert_eq!(to_minor_units(Decimal::new(19995, 3)).unwrap(), 2000);
        assert_eq!(to_minor_units(Decimal::from(45)).unwrap(), 4500);
    }
}
