pub mod client;
pub mod processing;

pub use client::*;
pub use processing::*;
