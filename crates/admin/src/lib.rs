//! WaterLife Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate owns catalog writes and must only be deployed behind the
//! VPN/reverse-proxy boundary. Every admin surface is gated by the
//! `ADMIN_ALLOWED_EMAILS` allow-list via `middleware::RequireAdmin`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
