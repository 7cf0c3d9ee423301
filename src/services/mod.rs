pub mod razorpay;
pub mod smtp_mailer;
