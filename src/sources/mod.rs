//! Source adapters: independent, unreliable fact sources.
//!
//! Each adapter queries one external system and returns a typed partial
//! result or "no data" (`Option`/empty fields) - never an error. The
//! assembler treats every adapter as optional enrichment.

/// Financial/revenue estimator (market-data timeseries).
pub mod finance;
/// Recent-news summarizer (news API, credential-gated).
pub mod news;
/// Public employee-reviews summarizer (web search + extraction).
pub mod reviews;
/// Language-model report synthesizer (alternative assembly path).
pub mod synth;
/// Arbitrary-URL content extractor (values/history heuristics).
pub mod website;
/// Encyclopedic overview + infobox adapter.
pub mod wikipedia;
