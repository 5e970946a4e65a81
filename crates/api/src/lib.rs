//! Escape room theme API server library.
//!
//! Exposes the building blocks (config, state, envelope, error handling,
//! theme service, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
