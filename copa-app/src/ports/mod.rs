pub mod notification;
pub mod store;
