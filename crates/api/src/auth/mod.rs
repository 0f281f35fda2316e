//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT session-token generation and validation.
//! - [`cookie`] -- the `token` session cookie (set, clear, parse).
//! - [`otp`] -- the in-memory pending-registration store for OTP signup.

pub mod cookie;
pub mod jwt;
pub mod otp;
pub mod password;
