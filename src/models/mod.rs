pub mod inquiry;
pub mod response;

pub use inquiry::{Inquiry, InquiryRequest, OptionalField};
pub use response::{ContactResponse, TestEmailResponse};
