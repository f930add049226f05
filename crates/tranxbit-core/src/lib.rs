//! Core library for `Tranxbit`.
//!
//! Contains the registration pipeline (draft, validator, strength scorer,
//! submission guard, view-model and form session), the registrar seam to the
//! external authentication service, and the static data behind the buy-card
//! widget, landing content and dashboard shell. This crate performs no I/O of
//! its own; the server and CLI crates supply transport.

pub mod catalog;
pub mod content;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod guard;
pub mod registrar;
pub mod session;
pub mod strength;
pub mod validation;
pub mod view;
