pub mod parcels;
pub mod payments;

pub use parcels::{
    CreateParcelRequest, InsertedResponse, MessageResponse, ParcelListParams, ParcelResponse,
    UserInfoInput,
};
pub use payments::{
    CreatePaymentIntentRequest, CreatePaymentIntentResponse, PaymentListParams, PaymentResponse,
    PaymentSuccessRequest, PaymentSuccessResponse,
};
