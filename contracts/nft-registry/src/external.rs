use commons::ContractTokenId;
use concordium_cis2::{AdditionalData, Receiver};
use concordium_std::*;

/// The parameter type for the contract function `mint`.
#[derive(Debug, Serialize, SchemaType)]
pub struct MintParams {
    /// Owner of the newly minted token.
    pub to: Address,
    /// Caller-supplied ID, must not exist yet.
    pub token_id: ContractTokenId,
}

/// The parameter type for the contract function `transfer`.
#[derive(Debug, Serialize, SchemaType)]
pub struct TransferParameter {
    /// Current owner of the token.
    pub from: Address,
    /// New owner of the token.
    pub to: Address,
    pub token_id: ContractTokenId,
}

/// The parameter type for the contract function `safeTransfer`.
///
/// A `Receiver::Contract` names the hook entrypoint that has to acknowledge
/// the token.
#[derive(Debug, Serialize, SchemaType)]
pub struct SafeTransferParameter {
    /// Current owner of the token.
    pub from: Address,
    /// New owner of the token.
    pub to: Receiver,
    pub token_id: ContractTokenId,
    /// Forwarded unchanged to the receive hook.
    pub data: AdditionalData,
}

/// The parameter type for the contract function `approve`.
#[derive(Debug, Serialize, SchemaType)]
pub struct ApproveParams {
    /// New approved spender. The null address revokes the approval.
    pub spender: Address,
    pub token_id: ContractTokenId,
}

/// The parameter type for the contract function `setApprovalForAll`.
#[derive(Debug, Serialize, SchemaType)]
pub struct ApprovalForAllParams {
    pub operator: Address,
    pub approved: bool,
}

/// The parameter type for the contract function `isApprovedForAll`.
#[derive(Debug, Serialize, SchemaType)]
pub struct OperatorQuery {
    pub owner: Address,
    pub operator: Address,
}
