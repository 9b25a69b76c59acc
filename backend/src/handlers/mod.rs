//! HTTP handlers for the Bakery Retail Management Platform

pub mod auth;
pub mod baker;
pub mod credit;
pub mod export;
pub mod health;
pub mod messages;
pub mod orders;
pub mod products;
pub mod reports;
pub mod sync;
pub mod users;

pub use auth::*;
pub use baker::*;
pub use credit::*;
pub use export::*;
pub use health::*;
pub use messages::*;
pub use orders::*;
pub use products::*;
pub use reports::*;
pub use sync::*;
pub use users::*;
