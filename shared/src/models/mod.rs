//! Domain models for the Bakery Retail Management Platform

mod baker;
mod credit;
mod inventory;
mod message;
mod order;
mod product;
mod stock;
mod user;

pub use baker::*;
pub use credit::*;
pub use inventory::*;
pub use message::*;
pub use order::*;
pub use product::*;
pub use stock::*;
pub use user::*;
