pub mod common;
pub mod domain;
pub mod engine;
pub mod stats;
pub mod storage;
pub mod tools;

pub use domain::*;
