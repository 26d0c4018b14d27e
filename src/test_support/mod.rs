//! Shared helpers for unit tests that need a local mock server.

pub(crate) mod socket_guard;
