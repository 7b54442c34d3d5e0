//! Business logic services

pub mod round_task;
pub mod rounds;
pub mod sessions;
pub mod tutor;
