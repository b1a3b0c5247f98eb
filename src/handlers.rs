pub mod guests;
pub mod reports;
