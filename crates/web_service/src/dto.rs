use serde::{Deserialize, Serialize};

use chain_client::{BlockSummary, ContractCreation, LoanDetail, LoanRecord};

// Wire models for the deploy and explorer endpoints. Field names stay
// camelCase to match what the form and explorer views expect.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub contract_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlocksQuery {
    pub depth: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ContractsQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummaryDto {
    pub number: u64,
    pub hash: Option<String>,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub timestamp: u64,
    pub transaction_count: usize,
    pub contract_txs: Vec<ContractCreationDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCreationDto {
    pub tx_hash: String,
    pub from: String,
    pub contract_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecordDto {
    pub block_number: u64,
    pub tx_hash: String,
    pub contract_address: String,
    pub status: String,
}

/// One status bucket of the contract table, paginated independently the way
/// the table view pages each group.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusGroupDto {
    pub status: String,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub records: Vec<LoanRecordDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetailDto {
    pub contract_address: String,
    pub status: String,
    pub borrower_name: String,
    pub borrower_phone: String,
    pub borrower_email: String,
    pub borrower_physical_address: String,
    pub loan_amount: String,
    pub loan_type: String,
    pub loan_desired_timeline: String,
}

impl From<ContractCreation> for ContractCreationDto {
    fn from(creation: ContractCreation) -> Self {
        Self {
            tx_hash: creation.tx_hash,
            from: creation.from,
            contract_address: creation.contract_address,
        }
    }
}

impl From<BlockSummary> for BlockSummaryDto {
    fn from(block: BlockSummary) -> Self {
        Self {
            number: block.number,
            hash: block.hash,
            gas_used: block.gas_used,
            gas_limit: block.gas_limit,
            timestamp: block.timestamp,
            transaction_count: block.transaction_count,
            contract_txs: block
                .contract_creations
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<LoanRecord> for LoanRecordDto {
    fn from(record: LoanRecord) -> Self {
        Self {
            block_number: record.block_number,
            tx_hash: record.tx_hash,
            contract_address: record.contract_address,
            status: record.status.to_string(),
        }
    }
}

impl From<LoanDetail> for LoanDetailDto {
    fn from(detail: LoanDetail) -> Self {
        Self {
            contract_address: detail.contract_address,
            status: detail.status.to_string(),
            borrower_name: detail.borrower_name,
            borrower_phone: detail.borrower_phone,
            borrower_email: detail.borrower_email,
            borrower_physical_address: detail.borrower_physical_address,
            loan_amount: detail.loan_amount,
            loan_type: detail.loan_type,
            loan_desired_timeline: detail.loan_desired_timeline,
        }
    }
}

/// Group discovered loans by status in encounter order and slice each group
/// to the requested page.
pub fn group_by_status(
    records: Vec<LoanRecord>,
    page: usize,
    per_page: usize,
) -> Vec<StatusGroupDto> {
    let page = page.max(1);
    let per_page = per_page.max(1);

    let mut groups: Vec<(String, Vec<LoanRecordDto>)> = Vec::new();
    for record in records {
        let status = record.status.to_string();
        match groups.iter_mut().find(|(name, _)| *name == status) {
            Some((_, items)) => items.push(record.into()),
            None => groups.push((status, vec![record.into()])),
        }
    }

    groups
        .into_iter()
        .map(|(status, items)| {
            let total = items.len();
            let total_pages = total.div_ceil(per_page);
            let records = items
                .into_iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .collect();
            StatusGroupDto {
                status,
                total,
                page,
                per_page,
                total_pages,
                records,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_core::LoanStatus;

    fn record(status: LoanStatus, block_number: u64) -> LoanRecord {
        LoanRecord {
            block_number,
            tx_hash: format!("0xtx{block_number}"),
            contract_address: format!("0xcontract{block_number}"),
            status,
        }
    }

    #[test]
    fn groups_preserve_encounter_order() {
        let records = vec![
            record(LoanStatus::Approved, 1),
            record(LoanStatus::Pending, 2),
            record(LoanStatus::Approved, 3),
        ];

        let groups = group_by_status(records, 1, 5);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].status, "Approved");
        assert_eq!(groups[0].total, 2);
        assert_eq!(groups[1].status, "Pending");
        assert_eq!(groups[1].total, 1);
    }

    #[test]
    fn each_group_pages_independently() {
        let mut records = Vec::new();
        for n in 0..7 {
            records.push(record(LoanStatus::Pending, n));
        }
        records.push(record(LoanStatus::Repaid, 100));

        let groups = group_by_status(records, 2, 5);
        let pending = &groups[0];
        assert_eq!(pending.total, 7);
        assert_eq!(pending.total_pages, 2);
        assert_eq!(pending.records.len(), 2);
        assert_eq!(pending.records[0].block_number, 5);

        // Page 2 of a one-item group is empty but still listed.
        let repaid = &groups[1];
        assert_eq!(repaid.total, 1);
        assert_eq!(repaid.total_pages, 1);
        assert!(repaid.records.is_empty());
    }

    #[test]
    fn zero_page_inputs_are_clamped() {
        let records = vec![record(LoanStatus::Pending, 1)];
        let groups = group_by_status(records, 0, 0);
        assert_eq!(groups[0].page, 1);
        assert_eq!(groups[0].per_page, 1);
        assert_eq!(groups[0].records.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_status(Vec::new(), 1, 5).is_empty());
    }

    #[test]
    fn deploy_response_omits_absent_info() {
        let response = DeployResponse {
            contract_address: "0xabc".to_string(),
            info: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["contractAddress"], "0xabc");
        assert!(json.get("info").is_none());
    }
}
