//! # lec-core
//!
//! Core types shared across all Lectern crates.
//!
//! This crate provides:
//! - Request structs for lesson plans, assessments, and class insights,
//!   together with the precondition checks applied before generation
//! - Content entities produced by either generation path
//! - Enums for question types, difficulty, Bloom levels, and the
//!   generation state machine
//! - Cross-cutting error types
//! - Response envelopes pairing generated content with its route

pub mod entities;
pub mod enums;
pub mod errors;
pub mod requests;
pub mod responses;
