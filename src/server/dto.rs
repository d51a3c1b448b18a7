//! Data Transfer Objects
//!
//! Request and response types for the JSON endpoints.

use serde::{Deserialize, Serialize};

/// Health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Number of mounted pages
    pub pages: usize,
    /// Seconds since server start
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}

/// A mounted page
#[derive(Debug, Serialize, Deserialize)]
pub struct PageInfo {
    pub path: String,
    pub title: String,
}

/// Page listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct PageListResponse {
    pub pages: Vec<PageInfo>,
    pub total: usize,
}

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Page path, e.g. `/dashboard`
    pub page: String,
    /// Name of a frame binding defined by the page
    pub binding: String,
}
