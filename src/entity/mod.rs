pub mod order_items;
pub mod orders;
pub mod supplier_products;
pub mod suppliers;
