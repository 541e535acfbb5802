//! # lec-relay
//!
//! A small HTTP relay that lets callers using the proxy transport reach a
//! chat-completion endpoint without holding its credential.
//!
//! Callers POST `{messages, response_format}` to the configured path. The
//! relay adds the model, default sampling parameters, and the bearer key,
//! forwards the body upstream, and returns the upstream status and body
//! unchanged.
//!
//! | Condition | Status |
//! |---|---|
//! | other path | 404 |
//! | method other than POST | 405 |
//! | body not JSON, or no non-empty `messages` array | 400 |
//! | no upstream API key configured | 503 |
//! | upstream unreachable or timed out | 502 |
//! | otherwise | upstream status |

mod error;
mod forward;
mod server;

pub use error::RelayError;
pub use forward::{Rejection, build_upstream_body};
pub use server::{RelayServer, ShutdownHandle};
