pub mod document;
pub mod row;
