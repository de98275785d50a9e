pub mod faq;
pub mod hotel;
pub mod master;
pub mod review;
pub mod room;
