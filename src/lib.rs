//! Library exports for the link shortener
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod registry;
pub mod route;
