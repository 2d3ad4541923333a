//! Core library for materio: turns a free-text project description into a
//! structured set of material recommendations via a text-generation service.
//!
//! # Architecture
//!
//! ```text
//! description --> Pipeline::submit
//!                     |
//!                     v
//!               summarize  --(one sentence)--> suggest --(raw prose)-->
//!               parse --(MaterialRecordSet)--> enrich --(image URLs)-->
//!               ProjectSuggestions
//! ```
//!
//! The [`gateway::Gateway`] trait is the only seam to the outside world;
//! [`gateway::openai::OpenAiGateway`] is the production adapter. Everything
//! downstream of the gateway is pure, per-request state.

pub mod gateway;
pub mod parse;
pub mod pipeline;
pub mod record;
