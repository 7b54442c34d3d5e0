//! API route handlers

pub mod catalog;
pub mod rounds;
pub mod sessions;
pub mod tutor;
