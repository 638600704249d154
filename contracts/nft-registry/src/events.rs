use commons::{
    ContractTokenId, APPROVAL_FOR_ALL_TAG, APPROVAL_TAG, NULL_ADDRESS, TRANSFER_TAG,
};
use concordium_std::*;

/// Ownership of a token changed. Mint is logged from the null address, burn
/// to the null address.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub token_id: ContractTokenId,
}

/// The approved spender of a token changed.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ApprovalEvent {
    pub owner: Address,
    /// The null address when the approval was revoked.
    pub spender: Address,
    pub token_id: ContractTokenId,
}

/// An operator was enabled or disabled for an owner.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ApprovalForAllEvent {
    pub owner: Address,
    pub operator: Address,
    pub approved: bool,
}

/// Tagged event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
    ApprovalForAll(ApprovalForAllEvent),
}

impl RegistryEvent {
    pub fn transfer(from: Address, to: Address, token_id: ContractTokenId) -> Self {
        Self::Transfer(TransferEvent { from, to, token_id })
    }

    pub fn mint(to: Address, token_id: ContractTokenId) -> Self {
        Self::transfer(NULL_ADDRESS, to, token_id)
    }

    pub fn burn(owner: Address, token_id: ContractTokenId) -> Self {
        Self::transfer(owner, NULL_ADDRESS, token_id)
    }

    pub fn approval(owner: Address, spender: Address, token_id: ContractTokenId) -> Self {
        Self::Approval(ApprovalEvent {
            owner,
            spender,
            token_id,
        })
    }

    pub fn approval_for_all(owner: Address, operator: Address, approved: bool) -> Self {
        Self::ApprovalForAll(ApprovalForAllEvent {
            owner,
            operator,
            approved,
        })
    }
}

impl Serial for RegistryEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            RegistryEvent::Transfer(event) => {
                out.write_u8(TRANSFER_TAG)?;
                event.serial(out)
            }
            RegistryEvent::Approval(event) => {
                out.write_u8(APPROVAL_TAG)?;
                event.serial(out)
            }
            RegistryEvent::ApprovalForAll(event) => {
                out.write_u8(APPROVAL_FOR_ALL_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for RegistryEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            TRANSFER_TAG => TransferEvent::deserial(source).map(RegistryEvent::Transfer),
            APPROVAL_TAG => ApprovalEvent::deserial(source).map(RegistryEvent::Approval),
            APPROVAL_FOR_ALL_TAG => {
                ApprovalForAllEvent::deserial(source).map(RegistryEvent::ApprovalForAll)
            }
            _ => Err(ParseError::default()),
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;

    const ALICE: Address = Address::Account(AccountAddress([1; 32]));

    #[concordium_test]
    fn test_mint_and_burn_use_null_address() {
        let token_id = TokenIdVec(vec![7]);

        claim_eq!(
            RegistryEvent::mint(ALICE, token_id.clone()),
            RegistryEvent::Transfer(TransferEvent {
                from: NULL_ADDRESS,
                to: ALICE,
                token_id: token_id.clone(),
            })
        );
        claim_eq!(
            RegistryEvent::burn(ALICE, token_id.clone()),
            RegistryEvent::Transfer(TransferEvent {
                from: ALICE,
                to: NULL_ADDRESS,
                token_id,
            })
        );
    }

    #[concordium_test]
    fn test_event_tag_prefix() {
        let bytes = to_bytes(&RegistryEvent::approval_for_all(ALICE, NULL_ADDRESS, true));
        claim_eq!(bytes[0], APPROVAL_FOR_ALL_TAG);

        let parsed: RegistryEvent = from_bytes(&bytes).expect_report("Event should parse");
        claim_eq!(
            parsed,
            RegistryEvent::approval_for_all(ALICE, NULL_ADDRESS, true)
        );
    }

    #[concordium_test]
    fn test_unknown_tag_rejected() {
        let mut bytes = to_bytes(&RegistryEvent::approval(
            ALICE,
            NULL_ADDRESS,
            TokenIdVec(vec![1]),
        ));
        bytes[0] = u8::MAX;
        claim!(from_bytes::<RegistryEvent>(&bytes).is_err());
    }
}
