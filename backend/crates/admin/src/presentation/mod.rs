//! Presentation Layer - HTTP handlers, forms, pages, router

pub mod dto;
pub mod handlers;
pub mod router;
pub mod views;
