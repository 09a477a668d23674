//! # Checkout Commands
//!
//! The footer's two buttons. Both open a confirmation first; nothing
//! happens to the cart until `confirm`.
//!
//! ```text
//! [주문취소] ─► request_cancel ─┐                 ┌─► confirm ─► cart cleared
//!                               ├─► confirmation ─┤
//! [결제하기] ─► request_payment ┘                 └─► dismiss ─► unchanged
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::HostError;
use crate::state::{CheckoutFlow, CheckoutResult, OrderSession};

/// Current state of the confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowResponse {
    pub flow: CheckoutFlow,
}

/// Asks the customer to confirm cancelling the whole order.
pub fn request_cancel(session: &OrderSession) -> Result<FlowResponse, HostError> {
    debug!("request_cancel command");
    let flow = session.request_cancel()?;
    Ok(FlowResponse { flow })
}

/// Asks the customer to confirm payment.
pub fn request_payment(session: &OrderSession) -> Result<FlowResponse, HostError> {
    debug!("request_payment command");
    let flow = session.request_payment()?;
    Ok(FlowResponse { flow })
}

/// Accepts the open confirmation.
///
/// ## Returns
/// `cancelled` with the number of dropped lines, or `paid` with a receipt
pub fn confirm(session: &OrderSession) -> Result<CheckoutResult, HostError> {
    debug!("confirm command");
    session.confirm()
}

/// Closes the open confirmation, leaving the cart as it was.
pub fn dismiss(session: &OrderSession) -> Result<FlowResponse, HostError> {
    debug!("dismiss command");
    let flow = session.dismiss()?;
    Ok(FlowResponse { flow })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::error::ErrorCode;
    use crate::state::HostConfig;
    use kiosk_core::seed;

    fn session() -> OrderSession {
        OrderSession::new(seed::default_catalog().unwrap(), &HostConfig::default()).unwrap()
    }

    #[test]
    fn test_pay_flow() {
        let session = session();
        add_to_cart(&session, "classicburger", Some(2)).unwrap();

        let opened = request_payment(&session).unwrap();
        assert_eq!(opened.flow, CheckoutFlow::ConfirmingPayment);

        let json = serde_json::to_value(confirm(&session).unwrap()).unwrap();
        assert_eq!(json["outcome"], "paid");
        assert_eq!(json["receipt"]["totalQuantity"], 2);
        assert_eq!(json["receipt"]["totalPrice"], 11000);
        assert!(get_cart(&session).lines.is_empty());
    }

    #[test]
    fn test_cancel_then_dismiss() {
        let session = session();
        add_to_cart(&session, "lemonade", None).unwrap();

        request_cancel(&session).unwrap();
        assert_eq!(dismiss(&session).unwrap().flow, CheckoutFlow::Idle);
        assert_eq!(get_cart(&session).lines.len(), 1);
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let session = session();
        assert_eq!(request_payment(&session).unwrap_err().code, ErrorCode::EmptyCart);
        assert_eq!(confirm(&session).unwrap_err().code, ErrorCode::InvalidState);
    }
}
