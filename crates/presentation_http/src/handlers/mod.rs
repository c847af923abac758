//! HTTP request handlers

pub mod emails;
pub mod generate;
pub mod health;
