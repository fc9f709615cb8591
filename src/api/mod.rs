//! API module for HTTP handlers, middleware, and DTOs.
//!
//! This module provides the HTTP layer of the console: the CRUD screens,
//! flash messages carried across redirects, and the view responses.

pub mod dto;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod view;
