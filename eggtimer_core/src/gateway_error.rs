//! Maps `Box<dyn Error>` from trait boundaries to typed `EggTimerError`.
//!
//! The traits in `eggtimer_traits` use `Box<dyn Error + Send + Sync>`; this
//! module converts those to our typed error enum, with an optional
//! feature-gated path for `eggtimer_gateways::GatewayError` downcasting.

use crate::error::EggTimerError;

/// Map a notifier-boundary error to a typed `EggTimerError`.
///
/// Known gateway error types are downcast first, then string heuristics apply.
pub fn map_gateway_error(e: &(dyn std::error::Error + 'static)) -> EggTimerError {
    #[cfg(feature = "gateway-errors")]
    {
        if let Some(gw) = e.downcast_ref::<eggtimer_gateways::error::GatewayError>() {
            return match gw {
                eggtimer_gateways::error::GatewayError::PermissionDenied => {
                    EggTimerError::PermissionDenied
                }
                other => EggTimerError::Notification(other.to_string()),
            };
        }
    }

    let s = e.to_string();
    if s.to_lowercase().contains("permission") {
        EggTimerError::PermissionDenied
    } else {
        EggTimerError::Notification(s)
    }
}
