// src/core/mod.rs

pub mod converter;
pub mod dict;
pub mod engine;
pub mod merger;
pub mod rawdict;
pub mod render;
pub mod report;
pub mod types;
pub mod userdb;
