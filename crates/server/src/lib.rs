pub mod config;

pub mod state;

pub mod rest;

pub mod openapi;

pub mod error_convert;

pub mod telemetry;

pub mod health;

// Case-law engine
pub mod analytics;

pub mod cache;

pub mod dataset;

pub mod dates;

pub mod filter;

pub mod session;
