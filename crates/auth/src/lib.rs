//! `fleetreg-auth` — credential handling.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns a
//! plaintext password into a salted one-way hash and checks candidates
//! against stored hashes. Nothing here ever returns plaintext.

pub mod password;

pub use password::{PasswordError, hash_password, verify_password};
