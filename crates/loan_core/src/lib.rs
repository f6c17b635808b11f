//! loan_core - Core types and text handling for mortgage-chain
//!
//! This crate provides the foundational pieces shared by the service crates:
//! - `application` - the mortgage-application payload posted by the form
//! - `status` - on-chain loan status mapping
//! - `prompt` - contract template and prompt construction
//! - `sanitize` - generated-source cleanup and tool-output scraping
//! - `config` - runtime configuration

pub mod application;
pub mod config;
pub mod prompt;
pub mod sanitize;
pub mod status;

// Re-export commonly used types
pub use application::{Borrower, Contact, LoanApplication, LoanDetails};
pub use config::Config;
pub use prompt::{build_prompt, date_to_unix_timestamp, PromptError, BASE_CONTRACT_NAME};
pub use sanitize::{
    extract_contract_address, rename_contract, strip_markdown_fences, ZERO_ADDRESS,
};
pub use status::LoanStatus;
