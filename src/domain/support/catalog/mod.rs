//! Literal response catalog, one module per support desk.
//!
//! Pure data: cached replies, default replies, prompt framing and slice
//! width. Table order is first-match-wins.

pub mod account;
pub mod event;
pub mod faq;
pub mod ticket;
