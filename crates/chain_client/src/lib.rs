//! chain_client - Development-chain RPC reader
//!
//! Walks recent blocks on the local node, detects contract-creation
//! transactions, and reads deployed loan contracts through their view
//! functions. Reads are sequential per block and transaction; results are
//! fetched fresh on every call and never cached.

mod bindings;

use std::sync::Arc;

use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, Block, Transaction, U64};
use thiserror::Error;

use bindings::MortgageLoan;
use loan_core::LoanStatus;

pub use ethers::types::Address as ContractAddress;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Invalid RPC endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("RPC error: {0}")]
    Rpc(#[from] ethers::providers::ProviderError),

    #[error("Contract read failed for {address}: {message}")]
    ContractRead { address: String, message: String },
}

pub type Result<T> = std::result::Result<T, ChainError>;

/// One block as the explorer renders it.
#[derive(Debug, Clone)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: Option<String>,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub timestamp: u64,
    pub transaction_count: usize,
    pub contract_creations: Vec<ContractCreation>,
}

/// A transaction that created a contract (no `to`, receipt carries an
/// address).
#[derive(Debug, Clone)]
pub struct ContractCreation {
    pub tx_hash: String,
    pub from: String,
    pub contract_address: String,
}

/// A discovered loan contract with its current on-chain status.
#[derive(Debug, Clone)]
pub struct LoanRecord {
    pub block_number: u64,
    pub tx_hash: String,
    pub contract_address: String,
    pub status: LoanStatus,
}

/// Everything one walk over the recent chain produces.
#[derive(Debug, Clone, Default)]
pub struct ChainScan {
    pub blocks: Vec<BlockSummary>,
    pub loans: Vec<LoanRecord>,
}

/// Full state of one loan contract.
#[derive(Debug, Clone)]
pub struct LoanDetail {
    pub contract_address: String,
    pub status: LoanStatus,
    pub borrower_name: String,
    pub borrower_phone: String,
    pub borrower_email: String,
    pub borrower_physical_address: String,
    pub loan_amount: String,
    pub loan_type: String,
    pub loan_desired_timeline: String,
}

#[derive(Debug)]
pub struct ChainClient {
    provider: Arc<Provider<Http>>,
}

impl ChainClient {
    pub fn connect(rpc_url: &str) -> Result<Self> {
        let provider =
            Provider::<Http>::try_from(rpc_url).map_err(|e| ChainError::InvalidEndpoint {
                url: rpc_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Walk `depth` blocks back from the chain head (floored at genesis) and
    /// collect block summaries plus every readable loan contract found in
    /// them. Blocks come back earliest first.
    pub async fn scan(&self, depth: u64) -> Result<ChainScan> {
        let latest = self.provider.get_block_number().await?.as_u64();
        let floor = latest.saturating_sub(depth);

        let mut scan = ChainScan::default();
        for number in (floor..=latest).rev() {
            let Some(block) = self.provider.get_block_with_txs(U64::from(number)).await? else {
                continue;
            };
            let summary = self.summarize_block(number, block, &mut scan.loans).await?;
            scan.blocks.push(summary);
        }

        // Earliest block at the top.
        scan.blocks.reverse();
        Ok(scan)
    }

    pub async fn latest_blocks(&self, depth: u64) -> Result<Vec<BlockSummary>> {
        Ok(self.scan(depth).await?.blocks)
    }

    pub async fn discover_loans(&self, depth: u64) -> Result<Vec<LoanRecord>> {
        Ok(self.scan(depth).await?.loans)
    }

    async fn summarize_block(
        &self,
        number: u64,
        block: Block<Transaction>,
        loans: &mut Vec<LoanRecord>,
    ) -> Result<BlockSummary> {
        let mut creations = Vec::new();

        for tx in &block.transactions {
            if tx.to.is_some() {
                continue;
            }
            let Some(receipt) = self.provider.get_transaction_receipt(tx.hash).await? else {
                continue;
            };
            let Some(address) = receipt.contract_address else {
                continue;
            };

            creations.push(ContractCreation {
                tx_hash: format!("{:#x}", tx.hash),
                from: format!("{:#x}", tx.from),
                contract_address: format!("{address:#x}"),
            });

            // Only contracts with code on the account are worth a status
            // read; a per-contract failure skips the record, not the scan.
            match self.try_read_status(address).await {
                Ok(Some(status)) => loans.push(LoanRecord {
                    block_number: number,
                    tx_hash: format!("{:#x}", tx.hash),
                    contract_address: format!("{address:#x}"),
                    status,
                }),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Error reading contract status at {address:#x}: {e}");
                }
            }
        }

        Ok(BlockSummary {
            number,
            hash: block.hash.map(|h| format!("{h:#x}")),
            gas_used: block.gas_used.as_u64(),
            gas_limit: block.gas_limit.as_u64(),
            timestamp: block.timestamp.as_u64(),
            transaction_count: block.transactions.len(),
            contract_creations: creations,
        })
    }

    /// `Ok(None)` when the account has no code.
    async fn try_read_status(&self, address: Address) -> Result<Option<LoanStatus>> {
        let code = self.provider.get_code(address, None).await?;
        if code.as_ref().is_empty() {
            return Ok(None);
        }

        let contract = MortgageLoan::new(address, self.provider.clone());
        let raw = contract
            .status()
            .call()
            .await
            .map_err(|e| ChainError::ContractRead {
                address: format!("{address:#x}"),
                message: e.to_string(),
            })?;
        Ok(Some(LoanStatus::from_raw(raw)))
    }

    /// Read the full view surface of one loan contract.
    pub async fn loan_detail(&self, address: Address) -> Result<LoanDetail> {
        let contract = MortgageLoan::new(address, self.provider.clone());
        let read = |message: String| ChainError::ContractRead {
            address: format!("{address:#x}"),
            message,
        };

        let raw_status = contract.status().call().await.map_err(|e| read(e.to_string()))?;
        let borrower_name = contract
            .get_borrower_name()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;
        let borrower_phone = contract
            .get_borrower_phone()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;
        let borrower_email = contract
            .get_borrower_email()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;
        let borrower_physical_address = contract
            .get_borrower_physical_address()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;
        let loan_amount = contract
            .get_loan_amount()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;
        let loan_type = contract
            .get_loan_type()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;
        let loan_desired_timeline = contract
            .get_loan_desired_timeline()
            .call()
            .await
            .map_err(|e| read(e.to_string()))?;

        Ok(LoanDetail {
            contract_address: format!("{address:#x}"),
            status: LoanStatus::from_raw(raw_status),
            borrower_name,
            borrower_phone,
            borrower_email,
            borrower_physical_address,
            loan_amount: loan_amount.to_string(),
            loan_type,
            loan_desired_timeline: loan_desired_timeline.to_string(),
        })
    }
}
