use super::*;

// Tags 251..=255 are taken by the CIS-2 events.

/// Tag for the Transfer event.
pub const TRANSFER_TAG: u8 = u8::MAX - 5;

/// Tag for the Approval event.
pub const APPROVAL_TAG: u8 = u8::MAX - 6;

/// Tag for the ApprovalForAll event.
pub const APPROVAL_FOR_ALL_TAG: u8 = u8::MAX - 7;

/// Account reserved to mean "no owner". Never recorded as a token owner.
pub const NULL_ACCOUNT: AccountAddress = AccountAddress([0u8; 32]);

/// The null address, source of mint and destination of burn transfers.
pub const NULL_ADDRESS: Address = Address::Account(NULL_ACCOUNT);

/// Value a receive hook returns to accept a token in `safeTransfer`.
pub const RECEIVED_ACKNOWLEDGMENT: u32 = 0x150b_7a02;

/// Maximum length of a token ID in bytes.
pub const MAX_TOKEN_ID_LEN: usize = 32;

/// Identifier of the capability discovery standard.
pub const CIS0_IDENTIFIER: &str = "CIS-0";

/// Identifier of the ownership registry interface.
pub const NFT_REGISTRY_IDENTIFIER: &str = "ERC-721";

/// Standards reported as supported by `supportsInterface` and `supports`.
pub const SUPPORTED_STANDARDS: [StandardIdentifier<'static>; 2] = [
    StandardIdentifier::new_unchecked(CIS0_IDENTIFIER),
    StandardIdentifier::new_unchecked(NFT_REGISTRY_IDENTIFIER),
];

/// Check whether `id` names one of `SUPPORTED_STANDARDS`.
pub fn supports_standard(id: &StandardIdentifierOwned) -> bool {
    SUPPORTED_STANDARDS.contains(&id.as_standard_identifier())
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_supports_standard() {
        claim!(supports_standard(&StandardIdentifierOwned::new_unchecked(
            "CIS-0".into()
        )));
        claim!(supports_standard(&StandardIdentifierOwned::new_unchecked(
            "ERC-721".into()
        )));
        claim!(!supports_standard(&StandardIdentifierOwned::new_unchecked(
            "CIS-2".into()
        )));
        claim!(!supports_standard(&StandardIdentifierOwned::new_unchecked(
            "erc-721".into()
        )));
    }
}
