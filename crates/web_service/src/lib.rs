//! web_service - HTTP surface for mortgage-chain
//!
//! One POST endpoint drives the generate-and-deploy pipeline; the explorer
//! endpoints serve block, contract, and loan-state views read from the local
//! development chain.

pub mod controllers;
pub mod dto;
pub mod error;
pub mod server;

pub use error::AppError;
pub use server::AppState;
