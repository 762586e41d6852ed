//! HTTP-level integration tests over the in-memory booking store.

mod availability_test;
mod booking_test;
mod helpers;
