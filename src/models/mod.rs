pub mod parcel;
pub mod payment;

pub use parcel::{Parcel, UserInfo, PAYMENT_STATUS_PAID, PAYMENT_STATUS_UNPAID};
pub use payment::Payment;
