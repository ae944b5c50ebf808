//! toxtriage-web — dashboard and JSON API for the moderation service.
//! Provides:
//!   - Cloud analysis endpoint (structured verdict)
//!   - Local hybrid batch endpoint (six-label scores + escalation)
//!   - Appeal endpoint
//!   - Health and audit endpoints
//!   - Dashboard and system pages with an SSE event feed

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
