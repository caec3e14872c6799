pub mod catalog;
pub mod roller;
