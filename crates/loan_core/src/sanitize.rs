use once_cell::sync::Lazy;
use regex::Regex;

use crate::prompt::BASE_CONTRACT_NAME;

/// Sentinel returned when the deploy tool output carries no address.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(\w+)?").expect("fence regex"));

static CONTRACT_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"contract\s+{BASE_CONTRACT_NAME}\b")).expect("contract decl regex")
});

static CONTRACT_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"contract address:\s+(0x[a-fA-F0-9]+)").expect("address regex"));

/// Remove markdown code fences the model may emit despite instructions.
///
/// Handles both language-tagged (```solidity) and bare fences, then trims.
pub fn strip_markdown_fences(text: &str) -> String {
    FENCE_RE.replace_all(text, "").trim().to_string()
}

/// Rewrite every `contract CustomMortgageLoan` declaration to the
/// timestamped unique name. Already-suffixed names are left alone because of
/// the word boundary.
pub fn rename_contract(source: &str, unique_name: &str) -> String {
    CONTRACT_DECL_RE
        .replace_all(source, format!("contract {unique_name}"))
        .to_string()
}

/// Scrape a deployed contract address out of the toolchain output.
///
/// Returns the first `contract address: 0x...` match, if any.
pub fn extract_contract_address(output: &str) -> Option<String> {
    CONTRACT_ADDRESS_RE
        .captures(output)
        .map(|captures| captures[1].to_string())
}
