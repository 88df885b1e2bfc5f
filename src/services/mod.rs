//! The recommendation engine and its dataset plumbing
//!
//! Data flows `providers` → `preprocess` → `matrix` → `similarity` →
//! {`recommend`, `evaluate`}, with `popularity` consuming the preprocessed
//! dataset directly. `model` bundles one run of the whole pipeline.

pub mod evaluate;
pub mod matrix;
pub mod model;
pub mod popularity;
pub mod preprocess;
pub mod providers;
pub mod recommend;
pub mod similarity;
