pub mod booking_sink;
pub mod calendar;
pub mod clock;
pub mod intro;
pub mod messaging;
pub mod otp;
pub mod sessions;
pub mod wizard;
