use super::*;

pub type ContractResult<A> = Result<A, CustomContractError>;

/// Contract token ID type.
/// Token IDs are opaque byte strings limited to `MAX_TOKEN_ID_LEN` bytes, so
/// any 256-bit identifier fits.
pub type ContractTokenId = TokenIdVec;

/// Parameter passed to the receive hook of a contract receiving a token
/// through `safeTransfer`.
///
/// The hook must return `RECEIVED_ACKNOWLEDGMENT` serialized as `u32` for the
/// transfer to be accepted.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone)]
pub struct OnReceivingNftParams {
    /// Address that invoked the transfer.
    pub operator: Address,
    /// Previous owner of the token.
    pub from: Address,
    /// The token being transferred.
    pub token_id: ContractTokenId,
    /// Additional data forwarded from the transfer.
    pub data: AdditionalData,
}

/// Returns `true` for the reserved null address.
#[inline(always)]
pub fn is_null(address: &Address) -> bool {
    *address == NULL_ADDRESS
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_is_null() {
        claim!(is_null(&NULL_ADDRESS));
        claim!(!is_null(&Address::Account(AccountAddress([1; 32]))));
        // A contract at index 0 is a real contract, not the null address
        claim!(!is_null(&Address::Contract(ContractAddress {
            index: 0,
            subindex: 0,
        })));
    }
}
