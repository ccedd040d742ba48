pub mod edge;
pub mod tri_data_structure;
pub mod triangle;
