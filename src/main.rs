mod entity;
mod error;
mod handlers;
mod prelude;
mod pricing;
mod state;
mod sv;
mod utils;

use std::{env, net::SocketAddr, time::Duration};

use axum::{
  Router,
  routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{prelude::*, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "pricing=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:pricing.db?mode=rwc".into());
  let admin_token = env::var("ADMIN_TOKEN")
    .map_err(|_| anyhow::anyhow!("ADMIN_TOKEN not set"))?;

  info!("Starting LuxeStay Pricing Server v{}", env!("CARGO_PKG_VERSION"));

  let app_state = Arc::new(AppState::new(&db_url, &admin_token).await?);

  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .expect("Failed to build rate limiter config"),
  );

  let governor_limiter = governor_conf.limiter().clone();

  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  let app = Router::new()
    .route("/api/quote", post(handlers::quote))
    .route("/api/bookings", post(handlers::create_booking))
    .route("/api/bookings/{id}", get(handlers::receipt))
    .route(
      "/api/vouchers",
      post(handlers::create_voucher).get(handlers::list_vouchers),
    )
    .route("/api/vouchers/{code}", get(handlers::get_voucher))
    .route(
      "/api/vouchers/{code}/deactivate",
      post(handlers::deactivate_voucher),
    )
    .route("/api/plans", put(handlers::upsert_plan))
    .route("/api/guests/{guest_id}/tier", put(handlers::set_guest_tier))
    .route("/health", get(handlers::health))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state);

  let port: u16 =
    env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
