//! HTTP-level tests against in-memory store, lock, and cache backends.

mod event_test;
mod health_test;
mod helpers;
mod reservation_test;
