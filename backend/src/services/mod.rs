//! Business logic services for the Bakery Retail Management Platform

pub mod auth;
pub mod baker;
pub mod credit;
pub mod export;
pub mod messages;
pub mod orders;
pub mod products;
pub mod reports;
pub mod stock_sync;
pub mod users;

pub use auth::AuthService;
pub use baker::BakerService;
pub use credit::CreditService;
pub use export::ExportService;
pub use messages::MessageService;
pub use orders::OrderService;
pub use products::ProductService;
pub use reports::ReportService;
pub use stock_sync::StockSyncService;
pub use users::UserService;
