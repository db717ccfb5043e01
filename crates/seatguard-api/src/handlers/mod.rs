//! HTTP request handlers organized by domain.

pub mod event;
pub mod health;
pub mod reservation;
