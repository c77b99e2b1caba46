//! provgraph decoding pipeline
//!
//! Turns extended PROV-JSON text (the trace a script-instrumentation
//! tool emits) into a [`provgraph_model::ProvModel`].
//!
//! # Pipeline
//!
//! 1. [`flatten`]: parse the JSON, strip the tool namespace prefixes,
//!    unnest the section→id→record tree into a flat entry sequence
//! 2. [`route`]: classify each entry by the leading code of its
//!    identifier (`p1` → process, `pd3` → output edge, …)
//! 3. [`record`]: assemble each group into name-keyed records, validating
//!    field-set agreement and normalizing the `"NA"` sentinel away
//! 4. [`decode`] / [`agent`] / [`environment`]: build typed rows
//! 5. [`normalize`]: repair locale-damaged elapsed times, resolve
//!    snapshot values against the provenance directory
//!
//! The single entry points are [`parse_document`] and [`parse_file`];
//! construction is atomic: callers get a complete model or a
//! [`DecodeError`], never a partial one.
//!
//! # Example
//!
//! ```rust,ignore
//! use provgraph_parse::{parse_document, ParseOptions};
//!
//! let model = parse_document(&json_text, ParseOptions::default())?;
//! println!("{} process steps", model.processes().len());
//! ```

#![warn(unreachable_pub)]

pub mod agent;
pub mod decode;
pub mod environment;
pub mod flatten;
pub mod normalize;
pub mod record;
pub mod route;

mod builder;
mod error;

pub use builder::{parse_document, parse_file, EmptyInput, ParseOptions, SchemaMode};
pub use error::DecodeError;
