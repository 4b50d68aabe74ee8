//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into UI-facing APIs.
//! - Keep UI layers decoupled from storage and threading details.

pub mod note_service;
