pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod schedule;
pub mod session;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
