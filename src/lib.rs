// src/lib.rs
pub mod banner;
pub mod config;
pub mod errors;
pub mod prober;
pub mod providers;
