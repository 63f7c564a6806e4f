//! BeatScope - AI-powered Hip-Hop beat analysis
//!
//! This crate records or ingests a short audio clip and asks a hosted
//! multimodal model for a structured breakdown of its Hip-Hop stylistic
//! characteristics, defensively validating and repairing the model's output
//! before anything downstream trusts it.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, codecs, Gemini,
//!   OpenRouter, remote dispatch, config store)
//! - **Server**: The HTTP analysis boundary (axum)
//! - **CLI**: Command-line interface, argument parsing, and presentation

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
