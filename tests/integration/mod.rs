//! Shared fixtures for tests that run the client against a mock backend.

pub mod log_capture;
pub mod mock_server;
pub mod slow_server;
