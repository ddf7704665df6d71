//! Command implementations.

pub mod build;
pub mod check;
pub mod normalize;
pub mod render;
pub mod serve;
