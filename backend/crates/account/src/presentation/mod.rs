//! Presentation Layer
//!
//! HTTP handlers, middleware and routing.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;
