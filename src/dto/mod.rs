pub mod checkout;
pub mod reviews;
