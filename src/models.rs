pub mod guest;
pub mod report;
