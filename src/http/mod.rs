//! HTTP client module for backend checks
//!
//! Provides HTTP client functionality for probing the backend API.

mod client;

pub use client::{HttpClient, HttpError, HttpResponse};
