//! Routes
//!
//! Handlers organized by functionality.

pub mod export;
pub mod health;
pub mod pages;
