//! HTTP route table
//!
//! Registration and login are public; everything else sits behind the
//! bearer-token middleware.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::middleware::auth::require_auth;
use crate::services;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>, config: &ApiConfig) -> Router {
    let protected = Router::new()
        .route(
            "/api/getUserByAccountNumber",
            post(services::account::get_user_by_account_number),
        )
        .route(
            "/api/updateUserByAccountNumber",
            put(services::account::update_user_by_account_number),
        )
        .route(
            "/api/getTransactionsByUser",
            post(services::transaction::get_transactions_by_user),
        )
        .route("/api/transferMoney", put(services::transaction::transfer_money))
        .route("/api/withdrawMoney", put(services::transaction::withdraw_money))
        .route("/api/depositMoney", put(services::transaction::deposit_money))
        .route("/api/askForLoan", post(services::loan::ask_for_loan))
        .route(
            "/api/reportTotalIncome",
            post(services::report::report_total_income),
        )
        .route(
            "/api/reportTotalOutcome",
            post(services::report::report_total_outcome),
        )
        .route(
            "/api/reportTotalDebts",
            post(services::report::report_total_debts),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173")),
        )
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(services::health::health))
        .route("/api/register", post(services::auth::register))
        .route("/api/login", post(services::auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
