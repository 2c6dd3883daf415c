//! Audio Intercept API - structured analysis of radio-intercept transcripts
//!
//! This crate serves an HTTP API that sends a transcript to an LLM chat
//! completion endpoint with a per-route prompt profile and returns the
//! model's JSON text.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Prompt profiles, output schemas, report types, config and errors
//! - **Application**: Extraction pipeline, validator, profile registry and port traits
//! - **Infrastructure**: Adapter implementations (OpenAI client, XDG config store)
//! - **API**: axum routes, handlers and the error envelope
//! - **CLI**: Argument parsing, config commands, tracing setup and the server runner

pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
