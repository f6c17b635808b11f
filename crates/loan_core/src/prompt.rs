use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::application::LoanApplication;

/// Contract identifier the model is asked to produce. The deployment step
/// later rewrites it to a timestamped unique name.
pub const BASE_CONTRACT_NAME: &str = "CustomMortgageLoan";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Invalid desired timeline '{value}': expected YYYY-MM-DD ({source})")]
    InvalidTimeline {
        value: String,
        source: chrono::ParseError,
    },
}

/// Base Solidity template shown to the model. The hardcoded constructor
/// defaults are what the rewrite instructions replace.
const BASE_CONTRACT_TEMPLATE: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.0;

contract CustomMortgageLoan_1737937994398 {
    enum Status { Pending, Approved, Rejected, Repaid }
    Status public status;

    struct Contact {
        string phone;
        string email;
        string physicalAddress;
    }

    struct Borrower {
        string name;
        Contact contact;
    }

    struct Loan {
        uint256 amount;
        string loanType;
        uint256 desiredTimeline;
    }

    Borrower public borrower;
    Loan public loan;
    address public admin;

    constructor() {
        admin = msg.sender;
        borrower = Borrower({
            name: "Alice",
            contact: Contact({
                phone: "+1-777-888-9999",
                email: "alice@example.com",
                physicalAddress: "789 Main Street, Metropolis, NY, 10001"
            })
        });
        loan = Loan({
            amount: 500000,
            loanType: "Refinance Loan",
            desiredTimeline: 1792022400
        });
        status = Status.Pending;
    }

    modifier onlyAdmin() {
        require(msg.sender == admin, "Only admin can perform this action");
        _;
    }

    function approveLoan() public onlyAdmin {
        status = Status.Approved;
    }

    function rejectLoan() public onlyAdmin {
        status = Status.Rejected;
    }

    function repayLoan() public onlyAdmin {
        status = Status.Repaid;
    }

    function getBorrowerName() public view returns (string memory) {
        return borrower.name;
    }

    function getBorrowerPhone() public view returns (string memory) {
        return borrower.contact.phone;
    }

    function getBorrowerEmail() public view returns (string memory) {
        return borrower.contact.email;
    }

    function getBorrowerPhysicalAddress() public view returns (string memory) {
        return borrower.contact.physicalAddress;
    }

    function getLoanAmount() public view returns (uint256) {
        return loan.amount;
    }

    function getLoanType() public view returns (string memory) {
        return loan.loanType;
    }

    function getLoanDesiredTimeline() public view returns (uint256) {
        return loan.desiredTimeline;
    }
}"#;

/// Convert a "YYYY-MM-DD" form date to a Unix timestamp at midnight UTC.
pub fn date_to_unix_timestamp(value: &str) -> Result<i64, PromptError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
        PromptError::InvalidTimeline {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

/// Render the rewrite prompt for one application.
///
/// The borrower and loan fields are interpolated as-is; the model sees
/// exactly what the form submitted.
pub fn build_prompt(application: &LoanApplication) -> Result<String, PromptError> {
    let unix_timestamp =
        date_to_unix_timestamp(&application.loan_details.desired_timeline)?;

    Ok(format!(
        r#"You are a highly skilled Solidity dev. Below is a base template for a "{contract_name}" contract:

"""
{template}
"""

Rewrite this entire contract as follows:
1. Rename the contract to "{contract_name}".
2. In the constructor, replace the hardcoded defaults with the following:
   - borrower.name -> "{borrower_name}"
   - borrower.contact.phone -> "{borrower_phone}"
   - borrower.contact.email -> "{borrower_email}"
   - borrower.contact.physicalAddress -> "{borrower_physical_address}"
   - loan.amount -> {loan_amount}
   - loan.loanType -> "{loan_type}"
   - loan.desiredTimeline -> {unix_timestamp}
3. Do NOT wrap your answer in triple backticks.
4. Return ONLY the updated Solidity code, with no extra text or commentary.
"#,
        contract_name = BASE_CONTRACT_NAME,
        template = BASE_CONTRACT_TEMPLATE,
        borrower_name = application.borrower.name,
        borrower_phone = application.borrower.contact.phone,
        borrower_email = application.borrower.contact.email,
        borrower_physical_address = application.borrower.contact.physical_address,
        loan_amount = application.loan_details.loan_amount,
        loan_type = application.loan_details.loan_type,
        unix_timestamp = unix_timestamp,
    ))
}
