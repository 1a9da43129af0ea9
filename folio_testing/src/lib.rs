//! Fake implementations of external services for local development and tests.

pub mod resend;
