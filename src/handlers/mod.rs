pub mod health;
pub mod parcels;
pub mod payments;

pub use health::{banner, health_check};
pub use parcels::{create_parcel, delete_parcel, get_parcel, list_parcels};
pub use payments::{create_payment_intent, list_payments, payment_success};
