use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{applied_promotion, booking, membership_plan, voucher},
  prelude::*,
  pricing::Quote,
  state::AppState,
  sv::{self, booking::BookingRequest, voucher::NewVoucher},
  utils::format_date,
};

#[derive(Serialize)]
pub struct Status {
  success: bool,
  msg: Option<String>,
}

impl Status {
  fn ok() -> Self {
    Self { success: true, msg: None }
  }
}

fn require_admin(app: &AppState, headers: &HeaderMap) -> Result<()> {
  let token = headers.get("x-admin-token").and_then(|v| v.to_str().ok());
  if token != Some(app.admin_token.as_str()) {
    return Err(Error::Unauthorized);
  }
  Ok(())
}

pub async fn health() -> Json<json::Value> {
  Json(json::json!({ "status": "ok" }))
}

#[derive(Serialize)]
pub struct QuoteResp {
  #[serde(flatten)]
  quote: Quote,
  voucher_rejected: Option<String>,
}

/// Price preview. A rejected voucher is reported in-band with the
/// price computed without it, so the checkout can keep the guest's
/// current total on screen.
pub async fn quote(
  State(app): State<Arc<AppState>>,
  Json(req): Json<BookingRequest>,
) -> Result<Json<QuoteResp>> {
  let (quote, rejection) = sv::Booking::new(&app.db).quote(&req).await?;

  Ok(Json(QuoteResp {
    quote,
    voucher_rejected: rejection.map(|err| err.to_string()),
  }))
}

#[derive(Serialize)]
pub struct BookingResp {
  booking: booking::Model,
  applied: Vec<applied_promotion::Model>,
}

pub async fn create_booking(
  State(app): State<Arc<AppState>>,
  Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResp>)> {
  let (booking, applied) = sv::Booking::new(&app.db).finalize(&req).await?;

  Ok((StatusCode::CREATED, Json(BookingResp { booking, applied })))
}

#[derive(Serialize)]
pub struct ReceiptResp {
  booking: booking::Model,
  applied: Vec<applied_promotion::Model>,
  issued_at: String,
}

pub async fn receipt(
  State(app): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ReceiptResp>> {
  let (booking, applied) = sv::Booking::new(&app.db).receipt(&id).await?;

  Ok(Json(ReceiptResp {
    issued_at: format_date(booking.created_at),
    booking,
    applied,
  }))
}

pub async fn create_voucher(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(new): Json<NewVoucher>,
) -> Result<(StatusCode, Json<voucher::Model>)> {
  require_admin(&app, &headers)?;

  let voucher = sv::Voucher::new(&app.db).create(new).await?;
  Ok((StatusCode::CREATED, Json(voucher)))
}

pub async fn list_vouchers(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<Vec<voucher::Model>>> {
  require_admin(&app, &headers)?;

  let vouchers = sv::Voucher::new(&app.db).list().await?;
  Ok(Json(vouchers))
}

pub async fn get_voucher(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(code): Path<String>,
) -> Result<Json<voucher::Model>> {
  require_admin(&app, &headers)?;

  let voucher = sv::Voucher::new(&app.db)
    .by_code(&code)
    .await?
    .ok_or(Error::VoucherNotFound)?;
  Ok(Json(voucher))
}

pub async fn deactivate_voucher(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(code): Path<String>,
) -> Result<Json<Status>> {
  require_admin(&app, &headers)?;

  sv::Voucher::new(&app.db).set_active(&code, false).await?;
  Ok(Json(Status::ok()))
}

#[derive(Deserialize)]
pub struct PlanReq {
  tier: String,
  discount_percent: i32,
  #[serde(default)]
  covers_services: bool,
}

pub async fn upsert_plan(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(req): Json<PlanReq>,
) -> Result<Json<membership_plan::Model>> {
  require_admin(&app, &headers)?;

  let plan = sv::Membership::new(&app.db)
    .upsert_plan(&req.tier, req.discount_percent, req.covers_services)
    .await?;
  Ok(Json(plan))
}

#[derive(Deserialize)]
pub struct TierReq {
  tier: Option<String>,
}

pub async fn set_guest_tier(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(guest_id): Path<i64>,
  Json(req): Json<TierReq>,
) -> Result<Json<Status>> {
  require_admin(&app, &headers)?;

  sv::Guest::new(&app.db).get_or_create(guest_id).await?;
  sv::Guest::new(&app.db).set_tier(guest_id, req.tier).await?;
  Ok(Json(Status::ok()))
}
