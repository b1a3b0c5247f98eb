pub mod guest_service;
pub mod report_service;
