pub mod repository;
pub mod stripe;

pub use repository::ParcelRepository;
pub use stripe::StripeClient;
