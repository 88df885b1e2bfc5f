//! cinerec — neighborhood-based movie recommendations over MovieLens data
//!
//! The engine lives in [`services`]: preprocessing, a dense user × movie
//! rating matrix, user-user cosine similarity, top-N recommendation, an
//! in-sample RMSE estimate and a mean-rating popularity fallback. The
//! [`api`] module exposes it over HTTP with a build-once shared model.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
