//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Signed time-limited bearer tokens (JWT)
//!
//! Both modules are pure and stateless: safe to call from any number of
//! concurrent requests without synchronization.

pub mod password;
pub mod token;
