//! # Client Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, ClientError>                                                │
//! │         │                                                               │
//! │         ├── Backend failure? ── ServiceError ──────┐                   │
//! │         │                                          ▼                   │
//! │         ├── Rule violation? ─── CoreError ──── ClientError ──► UI      │
//! │         │                                                               │
//! │         └── Success ─────────────────────────────────────────► UI      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI receives `{ "code": "CREDIT_EXCEEDS_BALANCE", "message": "..." }`
//! and shows the message as a transient notice.

use bazaar_core::CoreError;
use serde::Serialize;
use ts_rs::TS;

use crate::services::ServiceError;

/// Error returned from storefront commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Coupon cannot be used with the current selection
    CouponIneligible,

    /// Requested credit is more than the deposit balance
    CreditExceedsBalance,

    /// Requested credit is more than the order total
    CreditExceedsPayable,

    /// Login required
    Unauthorized,

    /// Backend unreachable or failing
    ServiceUnavailable,

    /// Invalid configuration
    ConfigError,

    /// Unexpected failure
    Internal,
}

impl ClientError {
    /// Creates a new client error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ClientError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ClientError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized() -> Self {
        ClientError::new(ErrorCode::Unauthorized, "Please log in to continue")
    }
}

/// Converts core errors to client errors.
impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        let code = match err {
            CoreError::DuplicateItem { .. } | CoreError::CartTooLarge { .. } => ErrorCode::CartError,
            CoreError::ItemNotInCart(_) | CoreError::CouponNotFound(_) => ErrorCode::NotFound,
            CoreError::IneligibleCoupon { .. } | CoreError::CouponExpired { .. } => ErrorCode::CouponIneligible,
            CoreError::CreditExceedsBalance { .. } => ErrorCode::CreditExceedsBalance,
            CoreError::CreditExceedsPayable { .. } => ErrorCode::CreditExceedsPayable,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ClientError::new(code, message)
    }
}

/// Converts backend service errors to client errors.
impl From<ServiceError> for ClientError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => ClientError::unauthorized(),
            ServiceError::NotFound { entity, id } => ClientError::not_found(&entity, &id),
            ServiceError::Conflict(message) => ClientError::new(ErrorCode::CartError, message),
            ServiceError::Unavailable(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Backend unavailable: {}", e);
                ClientError::new(ErrorCode::ServiceUnavailable, "The service is temporarily unavailable")
            }
            ServiceError::InvalidResponse(e) => {
                tracing::error!("Invalid backend response: {}", e);
                ClientError::new(ErrorCode::Internal, "Received an invalid response")
            }
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ClientError {}

/// Result type for storefront commands.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::Money;

    #[test]
    fn test_credit_errors_keep_distinct_codes() {
        let balance: ClientError = CoreError::CreditExceedsBalance {
            requested: Money::from_units(48_000),
            balance: Money::from_units(20_000),
        }
        .into();
        let payable: ClientError = CoreError::CreditExceedsPayable {
            requested: Money::from_units(50_000),
            payable: Money::from_units(48_000),
        }
        .into();

        assert_eq!(balance.code, ErrorCode::CreditExceedsBalance);
        assert_eq!(payable.code, ErrorCode::CreditExceedsPayable);
    }

    #[test]
    fn test_service_errors_hide_internals() {
        let err: ClientError = ServiceError::Unavailable("connection reset".to_string()).into();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
        assert!(!err.message.contains("connection reset"));
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let err = ClientError::unauthorized();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNAUTHORIZED");
    }
}
