//! Route definitions for the Bakery Retail Management Platform

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (login public, administration protected)
        .nest("/auth", auth_routes())
        // Protected routes - product catalog and inventory
        .nest("/products", product_routes())
        // Protected routes - spreadsheet stock import
        .nest("/sync", sync_routes())
        // Protected routes - order settlement and sales records
        .nest("/orders", order_routes())
        // Protected routes - baker submission workflow
        .nest("/baker", baker_routes())
        // Protected routes - credit sales
        .nest("/credit-sales", credit_routes())
        // Protected routes - reporting
        .nest("/reports", report_routes())
        // Protected routes - CSV exports
        .nest("/exports", export_routes())
        // Protected routes - messaging
        .nest("/messages", message_routes())
        // Protected routes - user administration
        .nest("/users", user_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .merge(protected_auth_routes())
}

fn protected_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/change-password", post(handlers::change_password))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).delete(handlers::delete_all_products),
        )
        .route("/location/:location", get(handlers::products_by_location))
        .route("/my-inventory", get(handlers::my_inventory))
        .route("/adjust-stock", post(handlers::adjust_stock))
        .route("/stock-history", get(handlers::stock_history))
        .route("/:product_id", delete(handlers::delete_product))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock import routes (protected)
fn sync_routes() -> Router<AppState> {
    Router::new()
        .route("/import", post(handlers::import_stock))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Order routes (protected)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_orders)
                .post(handlers::settle_order)
                .delete(handlers::delete_orders),
        )
        .route("/locations", get(handlers::order_locations))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Baker submission routes (protected)
fn baker_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/submissions",
            get(handlers::list_submissions)
                .post(handlers::submit_inventory)
                .delete(handlers::clear_submissions),
        )
        .route(
            "/submissions/:submission_id/approve",
            post(handlers::approve_submission),
        )
        .route(
            "/submissions/:submission_id/reject",
            post(handlers::reject_submission),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Credit sale routes (protected)
fn credit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_my_credit_sales).post(handlers::create_credit_sale),
        )
        .route("/all", get(handlers::list_all_credit_sales))
        .route(
            "/:credit_id",
            put(handlers::update_credit_sale).delete(handlers::delete_credit_sale),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/locations/:location", get(handlers::location_report))
        .route("/financial-summary", get(handlers::financial_summary))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// CSV export routes (protected)
fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(handlers::export_sales))
        .route("/stock-history", get(handlers::export_stock_history))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Messaging routes (protected)
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::send_message))
        .route("/conversation/:user_id", get(handlers::get_conversation))
        .route("/unread-count", get(handlers::unread_count))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// User administration routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users))
        .route("/:user_id", delete(handlers::delete_user))
        .route_layer(middleware::from_fn(auth_middleware))
}
