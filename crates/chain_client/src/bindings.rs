use ethers::contract::abigen;

// View surface of the deployed mortgage-loan contracts. Must stay in sync
// with the Solidity template's getters.
abigen!(
    MortgageLoan,
    r#"[
        function status() external view returns (uint8)
        function getBorrowerName() external view returns (string)
        function getBorrowerPhone() external view returns (string)
        function getBorrowerEmail() external view returns (string)
        function getBorrowerPhysicalAddress() external view returns (string)
        function getLoanAmount() external view returns (uint256)
        function getLoanType() external view returns (string)
        function getLoanDesiredTimeline() external view returns (uint256)
    ]"#
);
