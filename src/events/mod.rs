pub mod gesture;
pub mod selection;
