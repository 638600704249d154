use commons::*;
use concordium_cis2::{
    Receiver, StandardIdentifierOwned, SupportResult, SupportsQueryParams, SupportsQueryResponse,
};
use concordium_std::*;

use crate::events::RegistryEvent;
use crate::external::*;
use crate::state::State;

/// Initialize contract instance with no tokens.
#[init(contract = "NftRegistry")]
fn contract_init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// Mint a new token owned by the given address.
/// Logs a `Transfer` event from the null address.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The owner is the null address or the token ID is longer than 32 bytes.
/// - The token ID already exists.
/// - Fails to log event.
#[receive(
    contract = "NftRegistry",
    name = "mint",
    parameter = "MintParams",
    mutable,
    enable_logger
)]
fn contract_mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = MintParams::deserial(&mut ctx.parameter_cursor())?;

    host.state_mut().mint(&params.to, &params.token_id)?;

    logger.log(&RegistryEvent::mint(params.to, params.token_id))?;

    Ok(())
}

/// Burn a token. Only the owner may burn it.
/// Logs a `Transfer` event to the null address.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender is not the owner of the token.
/// - Fails to log event.
#[receive(
    contract = "NftRegistry",
    name = "burn",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn contract_burn<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;

    let owner = host.state_mut().burn(&ctx.sender(), &token_id)?;

    logger.log(&RegistryEvent::burn(owner, token_id))?;

    Ok(())
}

/// Transfer a token without notifying the receiver.
/// Logs a `Transfer` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token is not owned by `from`.
/// - `to` is the null address.
/// - The sender is not the owner, an operator of the owner or the approved
///   spender of the token.
/// - Fails to log event.
#[receive(
    contract = "NftRegistry",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn contract_transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = TransferParameter::deserial(&mut ctx.parameter_cursor())?;

    host.state_mut()
        .transfer(&ctx.sender(), &params.from, &params.to, &params.token_id)?;

    logger.log(&RegistryEvent::transfer(
        params.from,
        params.to,
        params.token_id,
    ))?;

    Ok(())
}

/// Transfer a token and, if the receiver is a contract, require it to
/// acknowledge the token through its receive hook.
/// Logs a `Transfer` event.
///
/// The state is updated before the hook runs. A rejection here makes the host
/// discard the whole update, so the transfer and the acknowledgment succeed or
/// fail together.
///
/// It rejects if:
/// - Any of the `transfer` conditions fails.
/// - The receive hook is missing, rejects, or returns anything other than
///   `RECEIVED_ACKNOWLEDGMENT`.
#[receive(
    contract = "NftRegistry",
    name = "safeTransfer",
    parameter = "SafeTransferParameter",
    mutable,
    enable_logger
)]
fn contract_safe_transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = SafeTransferParameter::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();
    let to = params.to.address();

    host.state_mut()
        .transfer(&sender, &params.from, &to, &params.token_id)?;

    logger.log(&RegistryEvent::transfer(
        params.from,
        to,
        params.token_id.clone(),
    ))?;

    if let Receiver::Contract(address, entrypoint) = params.to {
        let parameter = OnReceivingNftParams {
            operator: sender,
            from: params.from,
            token_id: params.token_id,
            data: params.data,
        };

        check_acknowledgment(host, &address, &parameter, entrypoint.as_entrypoint_name())?;
    }

    Ok(())
}

/// Invoke the receive hook and verify its acknowledgment.
fn check_acknowledgment<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    receiver: &ContractAddress,
    parameter: &OnReceivingNftParams,
    entrypoint: EntrypointName,
) -> ContractResult<()> {
    let response = host.invoke_contract(receiver, parameter, entrypoint, Amount::zero());
    let acknowledgment = match response {
        // The reply must be exactly one `u32`.
        Ok((_, Some(mut bytes))) => u32::deserial(&mut bytes)
            .ok()
            .filter(|_| bytes.read_u8().is_err()),
        _ => None,
    };

    ensure_eq!(
        acknowledgment,
        Some(RECEIVED_ACKNOWLEDGMENT),
        CustomContractError::UnsafeRecipient
    );

    Ok(())
}

/// Set the approved spender of a token, replacing the previous one. The null
/// address revokes the approval.
/// Logs an `Approval` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender is neither the owner nor an operator of the owner.
/// - Fails to log event.
#[receive(
    contract = "NftRegistry",
    name = "approve",
    parameter = "ApproveParams",
    mutable,
    enable_logger
)]
fn contract_approve<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = ApproveParams::deserial(&mut ctx.parameter_cursor())?;

    let owner = host
        .state_mut()
        .approve(&ctx.sender(), &params.spender, &params.token_id)?;

    logger.log(&RegistryEvent::approval(
        owner,
        params.spender,
        params.token_id,
    ))?;

    Ok(())
}

/// Enable or disable an operator for all tokens of the sender.
/// Logs an `ApprovalForAll` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - Fails to log event.
#[receive(
    contract = "NftRegistry",
    name = "setApprovalForAll",
    parameter = "ApprovalForAllParams",
    mutable,
    enable_logger
)]
fn contract_set_approval_for_all<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = ApprovalForAllParams::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    state.set_approval_for_all(&sender, &params.operator, params.approved, state_builder);

    logger.log(&RegistryEvent::approval_for_all(
        sender,
        params.operator,
        params.approved,
    ))?;

    Ok(())
}

#[receive(
    contract = "NftRegistry",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn contract_owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().owner_of(&token_id)
}

#[receive(
    contract = "NftRegistry",
    name = "balanceOf",
    parameter = "Address",
    return_value = "u64"
)]
fn contract_balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    let address = Address::deserial(&mut ctx.parameter_cursor())?;
    host.state().balance_of(&address)
}

/// Get the approved spender of a token, the null address if none is set.
#[receive(
    contract = "NftRegistry",
    name = "getApproved",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn contract_get_approved<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().get_approved(&token_id)
}

#[receive(
    contract = "NftRegistry",
    name = "isApprovedForAll",
    parameter = "OperatorQuery",
    return_value = "bool"
)]
fn contract_is_approved_for_all<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let query = OperatorQuery::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().is_operator(&query.owner, &query.operator))
}

/// Check whether the contract implements the given standard.
#[receive(
    contract = "NftRegistry",
    name = "supportsInterface",
    parameter = "StandardIdentifierOwned",
    return_value = "bool"
)]
fn contract_supports_interface<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let id = StandardIdentifierOwned::deserial(&mut ctx.parameter_cursor())?;
    Ok(supports_standard(&id))
}

/// CIS-0 query of a list of standards.
#[receive(
    contract = "NftRegistry",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn contract_supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    let params = SupportsQueryParams::deserial(&mut ctx.parameter_cursor())?;

    let results = params
        .queries
        .iter()
        .map(|id| {
            if supports_standard(id) {
                SupportResult::Support
            } else {
                SupportResult::NoSupport
            }
        })
        .collect();

    Ok(SupportsQueryResponse { results })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::test::*;
    use concordium_cis2::{AdditionalData, TokenIdVec};
    use test_infrastructure::*;

    const ACCOUNT_A: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_A: Address = Address::Account(ACCOUNT_A);
    const ACCOUNT_B: AccountAddress = AccountAddress([2u8; 32]);
    const ADDRESS_B: Address = Address::Account(ACCOUNT_B);
    const ACCOUNT_C: AccountAddress = AccountAddress([3u8; 32]);
    const ADDRESS_C: Address = Address::Account(ACCOUNT_C);

    const RECEIVER: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };
    const HOOK: &str = "onNftReceived";

    fn token_1() -> ContractTokenId {
        TokenIdVec(vec![1])
    }

    fn token_2() -> ContractTokenId {
        TokenIdVec(vec![2])
    }

    /// Test helper function which creates a host with `token_1` owned by
    /// `ADDRESS_A`.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();
        let mut state =
            contract_init(&ctx, &mut state_builder).expect_report("Contract initialization failed");
        state
            .mint(&ADDRESS_A, &token_1())
            .expect_report("Failed to mint token_1");
        TestHost::new(state, state_builder)
    }

    fn receiver_hook() -> Receiver {
        Receiver::Contract(
            RECEIVER,
            OwnedEntrypointName::new_unchecked(HOOK.into()),
        )
    }

    fn safe_transfer_params(to: Receiver, data: AdditionalData) -> SafeTransferParameter {
        SafeTransferParameter {
            from: ADDRESS_A,
            to,
            token_id: token_1(),
            data,
        }
    }

    /// Test initialization succeeds with an empty registry.
    #[concordium_test]
    fn test_init() {
        let ctx = TestInitContext::empty();
        let mut builder = TestStateBuilder::new();

        let state =
            contract_init(&ctx, &mut builder).expect_report("Contract initialization failed");

        claim_eq!(state.owners.iter().count(), 0, "No token should be initialized");
        claim_eq!(state.balance_of(&ADDRESS_A), Ok(0));
    }

    /// Test minting, ensuring the new token is owned by the given address and
    /// the transfer event from the null address is logged.
    #[concordium_test]
    fn test_mint() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_C);
        let parameter_bytes = to_bytes(&MintParams {
            to: ADDRESS_B,
            token_id: token_2(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_mint(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_2()), Ok(ADDRESS_B));
        claim_eq!(host.state().balance_of(&ADDRESS_B), Ok(1));
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&RegistryEvent::mint(ADDRESS_B, token_2())),
            "Incorrect event emitted"
        );
    }

    #[concordium_test]
    fn test_mint_existing_token() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_B);
        let parameter_bytes = to_bytes(&MintParams {
            to: ADDRESS_B,
            token_id: token_1(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_mint(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::AlreadyExists));
        claim_eq!(host.state().owner_of(&token_1()), Ok(ADDRESS_A));
        claim_eq!(host.state().balance_of(&ADDRESS_B), Ok(0));
        claim!(logger.logs.is_empty(), "No event should be logged");
    }

    #[concordium_test]
    fn test_mint_malformed_parameter() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        ctx.set_parameter(&[1, 2, 3]);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_mint(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::ParseParams));
    }

    /// Scenario: approve a spender, who then moves the token to a third party.
    #[concordium_test]
    fn test_approve_and_transfer() {
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes = to_bytes(&ApproveParams {
            spender: ADDRESS_B,
            token_id: token_1(),
        });
        ctx.set_parameter(&parameter_bytes);

        let result = contract_approve(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().get_approved(&token_1()), Ok(ADDRESS_B));

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_B);
        let parameter_bytes = to_bytes(&TransferParameter {
            from: ADDRESS_A,
            to: ADDRESS_C,
            token_id: token_1(),
        });
        ctx.set_parameter(&parameter_bytes);

        let result = contract_transfer(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let state = host.state();
        claim_eq!(state.owner_of(&token_1()), Ok(ADDRESS_C));
        claim_eq!(state.balance_of(&ADDRESS_A), Ok(0));
        claim_eq!(state.balance_of(&ADDRESS_C), Ok(1));
        claim_eq!(state.get_approved(&token_1()), Ok(NULL_ADDRESS));

        claim_eq!(logger.logs.len(), 2);
        claim_eq!(
            logger.logs[0],
            to_bytes(&RegistryEvent::approval(ADDRESS_A, ADDRESS_B, token_1()))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&RegistryEvent::transfer(ADDRESS_A, ADDRESS_C, token_1()))
        );
    }

    #[concordium_test]
    fn test_approve_not_authorized() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_B);
        let parameter_bytes = to_bytes(&ApproveParams {
            spender: ADDRESS_B,
            token_id: token_1(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(host.state().get_approved(&token_1()), Ok(NULL_ADDRESS));
        claim!(logger.logs.is_empty(), "No event should be logged");
    }

    /// Scenario: an operator moves a token without a token approval.
    #[concordium_test]
    fn test_operator_transfer() {
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes = to_bytes(&ApprovalForAllParams {
            operator: ADDRESS_B,
            approved: true,
        });
        ctx.set_parameter(&parameter_bytes);

        let result = contract_set_approval_for_all(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs[0],
            to_bytes(&RegistryEvent::approval_for_all(ADDRESS_A, ADDRESS_B, true))
        );

        let parameter_bytes = to_bytes(&MintParams {
            to: ADDRESS_A,
            token_id: token_2(),
        });
        ctx.set_parameter(&parameter_bytes);
        let result = contract_mint(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_B);
        let parameter_bytes = to_bytes(&TransferParameter {
            from: ADDRESS_A,
            to: ADDRESS_C,
            token_id: token_2(),
        });
        ctx.set_parameter(&parameter_bytes);

        let result = contract_transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_2()), Ok(ADDRESS_C));
        claim_eq!(host.state().balance_of(&ADDRESS_A), Ok(1));
        claim_eq!(host.state().balance_of(&ADDRESS_C), Ok(1));
    }

    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_B);
        let parameter_bytes = to_bytes(&TransferParameter {
            from: ADDRESS_A,
            to: ADDRESS_B,
            token_id: token_1(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(host.state().owner_of(&token_1()), Ok(ADDRESS_A));
        claim!(logger.logs.is_empty(), "No event should be logged");
    }

    #[concordium_test]
    fn test_transfer_to_null_address() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes = to_bytes(&TransferParameter {
            from: ADDRESS_A,
            to: NULL_ADDRESS,
            token_id: token_1(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvalidArgument));
        claim_eq!(host.state().balance_of(&ADDRESS_A), Ok(1));
    }

    /// Scenario: mint, burn, then the token is gone.
    #[concordium_test]
    fn test_burn() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_burn(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().owner_of(&token_1()),
            Err(CustomContractError::NotFound)
        );
        claim_eq!(host.state().balance_of(&ADDRESS_A), Ok(0));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RegistryEvent::burn(ADDRESS_A, token_1()))]
        );

        let result = contract_owner_of(&ctx, &host);
        claim_eq!(result, Err(CustomContractError::NotFound));
    }

    #[concordium_test]
    fn test_burn_by_operator() {
        let mut host = default_host();
        {
            let (state, state_builder) = host.state_and_builder();
            state.set_approval_for_all(&ADDRESS_A, &ADDRESS_B, true, state_builder);
        }

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_B);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();

        let result = contract_burn(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(host.state().owner_of(&token_1()), Ok(ADDRESS_A));
    }

    /// Test safe transfer to an account does not call any hook.
    #[concordium_test]
    fn test_safe_transfer_to_account() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes = to_bytes(&safe_transfer_params(
            Receiver::from_account(ACCOUNT_B),
            AdditionalData::empty(),
        ));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = contract_safe_transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_1()), Ok(ADDRESS_B));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RegistryEvent::transfer(ADDRESS_A, ADDRESS_B, token_1()))]
        );
    }

    /// Test the receive hook gets the transfer details and already observes
    /// the new owner.
    #[concordium_test]
    fn test_safe_transfer_to_contract() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes = to_bytes(&safe_transfer_params(
            receiver_hook(),
            AdditionalData::from(vec![4, 2]),
        ));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();
        host.setup_mock_entrypoint(
            RECEIVER,
            OwnedEntrypointName::new_unchecked(HOOK.into()),
            receive_hook_mock(
                |params, state: &State<TestStateApi>| {
                    params.operator == ADDRESS_A
                        && params.from == ADDRESS_A
                        && params.token_id == token_1()
                        && params.data == AdditionalData::from(vec![4, 2])
                        && state.owner_of(&token_1()) == Ok(Address::Contract(RECEIVER))
                        && state.get_approved(&token_1()) == Ok(NULL_ADDRESS)
                },
                RECEIVED_ACKNOWLEDGMENT,
            ),
        );

        let result = contract_safe_transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().owner_of(&token_1()),
            Ok(Address::Contract(RECEIVER))
        );
        claim_eq!(host.state().balance_of(&ADDRESS_A), Ok(0));
        claim_eq!(
            host.state().balance_of(&Address::Contract(RECEIVER)),
            Ok(1)
        );
    }

    /// Test helper running `safeTransfer` of `token_1` from `ADDRESS_A` to the
    /// receiver hook backed by `hook`, rolling the state back on rejection.
    /// Ensures the call fails with `UnsafeRecipient` and leaves ownership and
    /// balances as before the call.
    fn claim_safe_transfer_rejected(hook: MockFn<State<TestStateApi>>) {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_A);
        let parameter_bytes =
            to_bytes(&safe_transfer_params(receiver_hook(), AdditionalData::empty()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();
        host.setup_mock_entrypoint(
            RECEIVER,
            OwnedEntrypointName::new_unchecked(HOOK.into()),
            hook,
        );

        let result = host.with_rollback(|host| contract_safe_transfer(&ctx, host, &mut logger));

        claim_eq!(result, Err(CustomContractError::UnsafeRecipient));
        let state = host.state();
        claim_eq!(state.owner_of(&token_1()), Ok(ADDRESS_A));
        claim_eq!(state.balance_of(&ADDRESS_A), Ok(1));
        claim_eq!(state.balance_of(&Address::Contract(RECEIVER)), Ok(0));
    }

    /// Scenario: the hook answers with a wrong acknowledgment and the whole
    /// operation is rejected, so the transfer is discarded.
    #[concordium_test]
    fn test_safe_transfer_wrong_acknowledgment() {
        claim_safe_transfer_rejected(receive_hook_mock(|_, _| true, 0xdead_beef_u32));
    }

    /// The acknowledgment must be the whole return value.
    #[concordium_test]
    fn test_safe_transfer_acknowledgment_with_trailing_bytes() {
        claim_safe_transfer_rejected(receive_hook_mock(
            |_, _| true,
            (RECEIVED_ACKNOWLEDGMENT, 0u8),
        ));
    }

    #[concordium_test]
    fn test_safe_transfer_missing_hook() {
        claim_safe_transfer_rejected(failing_hook_mock(|| CallContractError::MissingEntrypoint));
    }

    #[concordium_test]
    fn test_safe_transfer_hook_rejects() {
        claim_safe_transfer_rejected(failing_hook_mock(|| CallContractError::Trap));
    }

    #[concordium_test]
    fn test_safe_transfer_hook_without_return_value() {
        claim_safe_transfer_rejected(silent_hook_mock());
    }

    /// The hook is not called when the transfer itself is rejected.
    #[concordium_test]
    fn test_safe_transfer_not_authorized() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_C);
        let parameter_bytes =
            to_bytes(&safe_transfer_params(receiver_hook(), AdditionalData::empty()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = default_host();
        host.setup_mock_entrypoint(
            RECEIVER,
            OwnedEntrypointName::new_unchecked(HOOK.into()),
            accepting_hook_mock(),
        );

        let result = contract_safe_transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(host.state().owner_of(&token_1()), Ok(ADDRESS_A));
        claim_eq!(
            host.state().balance_of(&Address::Contract(RECEIVER)),
            Ok(0)
        );
        claim!(logger.logs.is_empty(), "No event should be logged");
    }

    #[concordium_test]
    fn test_views() {
        let mut host = default_host();
        {
            let (state, state_builder) = host.state_and_builder();
            state.set_approval_for_all(&ADDRESS_A, &ADDRESS_C, true, state_builder);
            state
                .approve(&ADDRESS_A, &ADDRESS_B, &token_1())
                .expect_report("Failed to approve");
        }

        let mut ctx = TestReceiveContext::empty();
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_owner_of(&ctx, &host), Ok(ADDRESS_A));
        claim_eq!(contract_get_approved(&ctx, &host), Ok(ADDRESS_B));

        let parameter_bytes = to_bytes(&token_2());
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_get_approved(&ctx, &host),
            Err(CustomContractError::NotFound)
        );

        let parameter_bytes = to_bytes(&ADDRESS_A);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_balance_of(&ctx, &host), Ok(1));

        let parameter_bytes = to_bytes(&NULL_ADDRESS);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_balance_of(&ctx, &host),
            Err(CustomContractError::InvalidArgument)
        );

        let parameter_bytes = to_bytes(&OperatorQuery {
            owner: ADDRESS_A,
            operator: ADDRESS_C,
        });
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_is_approved_for_all(&ctx, &host), Ok(true));

        let parameter_bytes = to_bytes(&OperatorQuery {
            owner: ADDRESS_A,
            operator: ADDRESS_B,
        });
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_is_approved_for_all(&ctx, &host), Ok(false));
    }

    #[concordium_test]
    fn test_supports_interface() {
        let host = default_host();
        let mut ctx = TestReceiveContext::empty();

        let parameter_bytes = to_bytes(&StandardIdentifierOwned::new_unchecked(
            NFT_REGISTRY_IDENTIFIER.into(),
        ));
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_supports_interface(&ctx, &host), Ok(true));

        let parameter_bytes = to_bytes(&StandardIdentifierOwned::new_unchecked("CIS-2".into()));
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(contract_supports_interface(&ctx, &host), Ok(false));

        let parameter_bytes = to_bytes(&SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked(CIS0_IDENTIFIER.into()),
                StandardIdentifierOwned::new_unchecked("CIS-2".into()),
                StandardIdentifierOwned::new_unchecked(NFT_REGISTRY_IDENTIFIER.into()),
            ],
        });
        ctx.set_parameter(&parameter_bytes);
        let response = contract_supports(&ctx, &host).expect_report("Query should succeed");
        claim_eq!(
            response.results,
            vec![
                SupportResult::Support,
                SupportResult::NoSupport,
                SupportResult::Support,
            ]
        );
    }
}
