pub mod order_service;
pub mod supplier_service;
