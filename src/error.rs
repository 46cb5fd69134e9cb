use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a voucher may not be applied to a booking. Each variant maps
/// to exactly one user-facing checkout message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reject {
  #[error("voucher is inactive")]
  Inactive,
  #[error("voucher is not yet valid")]
  NotYetValid,
  #[error("voucher has expired")]
  Expired,
  #[error("booking is below the voucher minimum spend")]
  BelowMinimumSpend,
  #[error("voucher has no uses left")]
  Exhausted,
  #[error("per-guest redemption limit reached")]
  PerGuestLimitReached,
  #[error("membership tier is not eligible for this voucher")]
  TierNotEligible,
  #[error("voucher does not apply to this listing")]
  NotApplicableToListing,
  #[error("voucher does not stack with promotions already applied")]
  StackingConflict,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Db(#[from] sea_orm::DbErr),
  #[error("guest not found")]
  GuestNotFound,
  #[error("booking not found")]
  BookingNotFound,
  #[error("membership plan not found")]
  PlanNotFound,
  #[error("voucher not found")]
  VoucherNotFound,
  #[error("voucher rejected: {0}")]
  Voucher(#[from] Reject),
  #[error("invalid arguments: {0}")]
  InvalidArgs(String),
  #[error("unauthorized")]
  Unauthorized,
}

impl Error {
  fn status(&self) -> StatusCode {
    match self {
      Error::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Error::GuestNotFound
      | Error::BookingNotFound
      | Error::PlanNotFound
      | Error::VoucherNotFound => StatusCode::NOT_FOUND,
      Error::Voucher(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Error::InvalidArgs(_) => StatusCode::BAD_REQUEST,
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let msg = match &self {
      Error::Db(err) => {
        tracing::error!("database error: {err}");
        "internal error".to_string()
      }
      other => other.to_string(),
    };

    let body = Json(json::json!({
      "success": false,
      "msg": msg,
    }));

    (self.status(), body).into_response()
  }
}
