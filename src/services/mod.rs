pub mod checkout_service;
pub mod order_service;
pub mod review_service;
pub mod webhook_service;
