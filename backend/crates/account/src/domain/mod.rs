//! Domain Layer
//!
//! Entities, value objects and repository traits. Nothing here touches
//! HTTP or SQL.

pub mod entity;
pub mod repository;
pub mod value_object;
