//! # lec-service
//!
//! The content service facade. Every call walks the same state machine:
//!
//! ```text
//! idle → attempting_remote → succeeded → done
//!                          → falling_back_local → done
//!      → falling_back_local → done
//! ```
//!
//! Remote generation is attempted only when [`ServiceOptions::remote_enabled`]
//! is set and a transport was built. A remote failure emits one `warn!` event
//! with the error and is recorded in the returned
//! [`GenerationReport`](lec_core::responses::GenerationReport) as
//! `fallback_reason`; it never reaches the caller as an error.

mod route;
mod service;

pub use service::{ContentService, ServiceOptions};
