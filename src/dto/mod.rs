pub mod orders;
pub mod suppliers;
