//! Iconpack - Library for normalizing upstream SVG icon sets into React packages
//!
//! This library provides functionality to:
//! - Fetch upstream icon distributions from the npm registry
//! - Extract raw icon records from three structurally different providers
//! - Normalize them into a single canonical icon representation
//! - Render per-icon component files and deterministic barrel files

pub mod cli;
pub mod extract;
pub mod fetch;
pub mod index;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod svg;
pub mod version;
