//! LeadHub API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, routes)
//! so integration tests and the binary entrypoints can both access them.

pub mod activity;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
