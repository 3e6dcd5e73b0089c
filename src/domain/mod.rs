pub mod event;
pub mod notification;
pub mod order;
pub mod page;
pub mod ports;
pub mod pricing;
pub mod validation;
