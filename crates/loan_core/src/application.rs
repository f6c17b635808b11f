use serde::{Deserialize, Serialize};

/// Payload posted by the mortgage-application form.
///
/// Field names stay camelCase on the wire to match the form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub contract_name: String,
    pub borrower: Borrower,
    pub loan_details: LoanDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    pub name: String,
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub physical_address: String,
}

/// Loan terms as entered in the form. Amounts arrive as strings because the
/// form submits raw input values.
///
/// `interest_rate` and `income_bracket` ride along in the payload but are not
/// interpolated into the generated contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub loan_amount: String,
    pub loan_type: String,
    /// Desired repayment date, "YYYY-MM-DD".
    pub desired_timeline: String,
    #[serde(default)]
    pub interest_rate: Option<String>,
    #[serde(default)]
    pub income_bracket: Option<String>,
}
