#![allow(non_snake_case, non_upper_case_globals)]

pub(crate) type JsonValue = serde_json::value::Value;

pub mod configs;
pub mod dump;
pub mod error;
pub mod export;
pub mod host;
pub mod jarfs;
pub mod metadata;
pub mod types;
pub mod world;

#[cfg(test)]
mod testutil;
