//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random bytes, Base64)
//! - Password hashing (Argon2id)
//! - Cookie management and client IP extraction
//! - Outgoing mail (console and Resend transports)
//! - Cloudflare Turnstile verification
//! - The HTML layout and form components every page is built from

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod html;
pub mod mail;
pub mod password;
pub mod turnstile;
