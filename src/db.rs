pub mod guest_repo;
pub use guest_repo::GuestRepository;
pub mod seed;
