pub mod point_order;
pub mod types;
