//! Typing-tutor core for Malayalam on the InScript layout.
//!
//! Target text is split into grapheme clusters, each carrying the keystrokes
//! that type it ([`engine::model`]). Key events are reconciled against that
//! model one at a time ([`session::input`]), and a finished attempt is turned
//! into metrics, a lesson score and an advance decision ([`session::result`]).

pub mod assets;
pub mod config;
pub mod course;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod keyboard;
pub mod session;
pub mod text;

pub use error::{Error, Result};
