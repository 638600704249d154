use commons::*;
use concordium_std::*;
use core::ops::DerefMut;

/// The contract state.
///
/// A token exists iff `owners` holds an entry for it. The null address is
/// never stored as an owner.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Owner of every existing token.
    pub owners: StateMap<ContractTokenId, Address, S>,
    /// Number of tokens owned by each address.
    pub balances: StateMap<Address, u64, S>,
    /// Single approved spender of a token. Cleared on every ownership change.
    pub token_approvals: StateMap<ContractTokenId, Address, S>,
    /// Operators allowed to move any token of the owner.
    pub operators: StateMap<Address, StateSet<Address, S>, S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new state with no tokens.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            owners: state_builder.new_map(),
            balances: state_builder.new_map(),
            token_approvals: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    /// Get the owner of a token.
    /// Results in `NotFound` if the token does not exist.
    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.owners
            .get(token_id)
            .map(|owner| *owner)
            .ok_or(CustomContractError::NotFound)
    }

    /// Get the number of tokens owned by `address`, zero for unknown addresses.
    /// Results in `InvalidArgument` for the null address.
    pub fn balance_of(&self, address: &Address) -> ContractResult<u64> {
        ensure!(!is_null(address), CustomContractError::InvalidArgument);
        Ok(self.balance(address))
    }

    #[inline(always)]
    fn balance(&self, address: &Address) -> u64 {
        self.balances.get(address).map_or(0, |balance| *balance)
    }

    /// Get the approved spender of a token, the null address if there is none.
    /// Results in `NotFound` if the token does not exist.
    pub fn get_approved(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.owner_of(token_id)?;
        Ok(self
            .token_approvals
            .get(token_id)
            .map_or(NULL_ADDRESS, |spender| *spender))
    }

    /// Check if `operator` is an operator of `owner`.
    pub fn is_operator(&self, owner: &Address, operator: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(operator))
            .unwrap_or(false)
    }

    /// Check if `spender` may move the token `token_id` held by `owner`: it is
    /// the owner itself, an operator of the owner or the approved spender of
    /// the token.
    pub fn is_authorized(
        &self,
        owner: &Address,
        spender: &Address,
        token_id: &ContractTokenId,
    ) -> bool {
        spender == owner
            || self.is_operator(owner, spender)
            || self
                .token_approvals
                .get(token_id)
                .map_or(false, |approved| *approved == *spender)
    }

    /// Add a new operator for the given address.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }

    /// Record whether `operator` may move every token of `owner`, replacing
    /// any previous value.
    pub fn set_approval_for_all(
        &mut self,
        owner: &Address,
        operator: &Address,
        approved: bool,
        state_builder: &mut StateBuilder<S>,
    ) {
        if approved {
            self.add_operator(owner, operator, state_builder);
        } else {
            self.remove_operator(owner, operator);
        }
    }

    /// Set the approved spender of a token, overwriting the previous one.
    /// The null address as `spender` revokes the approval.
    ///
    /// Returns the owner of the token.
    /// Results in an error if the
    /// - token does not exist
    /// - sender is neither the owner nor an operator of the owner
    pub fn approve(
        &mut self,
        sender: &Address,
        spender: &Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<Address> {
        let owner = self.owner_of(token_id)?;
        ensure!(
            *sender == owner || self.is_operator(&owner, sender),
            CustomContractError::Unauthorized
        );

        if is_null(spender) {
            self.token_approvals.remove_and_get(token_id);
        } else {
            self.token_approvals.insert(token_id.clone(), *spender);
        }

        Ok(owner)
    }

    /// Move a token from `from` to `to` on behalf of `sender`.
    ///
    /// Results in an error if the
    /// - token is not owned by `from` (`Unauthorized`, also for missing tokens)
    /// - `to` is the null address
    /// - sender is not authorized for the token
    pub fn transfer(
        &mut self,
        sender: &Address,
        from: &Address,
        to: &Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<()> {
        ensure!(
            self.owners
                .get(token_id)
                .map_or(false, |owner| *owner == *from),
            CustomContractError::Unauthorized
        );
        ensure!(!is_null(to), CustomContractError::InvalidArgument);
        ensure!(
            self.is_authorized(from, sender, token_id),
            CustomContractError::Unauthorized
        );

        self.decrement_balance(from);
        self.increment_balance(to);
        self.owners.insert(token_id.clone(), *to);
        self.token_approvals.remove_and_get(token_id);

        Ok(())
    }

    /// Mint a new token owned by `to`.
    /// Results in an error if the
    /// - `to` is the null address or the token ID is longer than 32 bytes
    /// - token ID already exists
    pub fn mint(&mut self, to: &Address, token_id: &ContractTokenId) -> ContractResult<()> {
        ensure!(!is_null(to), CustomContractError::InvalidArgument);
        ensure!(
            token_id.0.len() <= MAX_TOKEN_ID_LEN,
            CustomContractError::InvalidArgument
        );

        match self.owners.entry(token_id.clone()) {
            Entry::Vacant(hole) => {
                hole.insert(*to);
            }
            Entry::Occupied(_) => bail!(CustomContractError::AlreadyExists),
        }
        self.increment_balance(to);

        Ok(())
    }

    /// Destroy a token. Only the owner may burn, approved spenders and
    /// operators may not.
    ///
    /// Returns the former owner.
    pub fn burn(
        &mut self,
        sender: &Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<Address> {
        let owner = self.owner_of(token_id)?;
        ensure_eq!(*sender, owner, CustomContractError::Unauthorized);

        self.decrement_balance(&owner);
        self.owners.remove_and_get(token_id);
        self.token_approvals.remove_and_get(token_id);

        Ok(owner)
    }

    fn increment_balance(&mut self, address: &Address) {
        self.balances
            .entry(*address)
            .and_modify(|balance| *balance += 1)
            .or_insert_with(|| 1);
    }

    // Only called for current owners, whose balance is at least one.
    fn decrement_balance(&mut self, address: &Address) {
        if let Some(mut balance) = self.balances.get_mut(address) {
            *balance -= 1;
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;
    use test_infrastructure::*;

    const ALICE: Address = Address::Account(AccountAddress([1; 32]));
    const BOB: Address = Address::Account(AccountAddress([2; 32]));
    const CAROL: Address = Address::Account(AccountAddress([3; 32]));
    const DAVE: Address = Address::Contract(ContractAddress {
        index: 4,
        subindex: 0,
    });

    fn token(id: u8) -> ContractTokenId {
        TokenIdVec(vec![id])
    }

    fn empty_state() -> (State<TestStateApi>, TestStateBuilder) {
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        (state, state_builder)
    }

    /// Balance of every address equals the number of tokens it owns.
    fn claim_balances_consistent(state: &State<TestStateApi>, addresses: &[Address]) {
        for address in addresses {
            let owned = state
                .owners
                .iter()
                .filter(|(_, owner)| **owner == *address)
                .count() as u64;
            claim_eq!(state.balance_of(address), Ok(owned));
        }
    }

    #[concordium_test]
    fn test_mint() {
        let (mut state, _) = empty_state();

        claim_eq!(state.mint(&ALICE, &token(1)), Ok(()));

        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_eq!(state.balance_of(&ALICE), Ok(1));
        claim_eq!(state.get_approved(&token(1)), Ok(NULL_ADDRESS));
    }

    #[concordium_test]
    fn test_mint_existing_token() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");

        claim_eq!(
            state.mint(&BOB, &token(1)),
            Err(CustomContractError::AlreadyExists)
        );
        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_eq!(state.balance_of(&ALICE), Ok(1));
        claim_eq!(state.balance_of(&BOB), Ok(0));
    }

    #[concordium_test]
    fn test_mint_invalid_arguments() {
        let (mut state, _) = empty_state();

        claim_eq!(
            state.mint(&NULL_ADDRESS, &token(1)),
            Err(CustomContractError::InvalidArgument)
        );
        claim_eq!(
            state.mint(&ALICE, &TokenIdVec(vec![0; MAX_TOKEN_ID_LEN + 1])),
            Err(CustomContractError::InvalidArgument)
        );
        claim_eq!(state.mint(&ALICE, &TokenIdVec(vec![0; MAX_TOKEN_ID_LEN])), Ok(()));
        claim_eq!(state.owner_of(&token(1)), Err(CustomContractError::NotFound));
    }

    #[concordium_test]
    fn test_balance_of() {
        let (mut state, _) = empty_state();

        claim_eq!(state.balance_of(&BOB), Ok(0));
        claim_eq!(
            state.balance_of(&NULL_ADDRESS),
            Err(CustomContractError::InvalidArgument)
        );

        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");
        state.mint(&ALICE, &token(2)).expect_report("Failed to mint token");
        state.mint(&DAVE, &token(3)).expect_report("Failed to mint token");

        claim_eq!(state.balance_of(&ALICE), Ok(2));
        claim_eq!(state.balance_of(&DAVE), Ok(1));
    }

    #[concordium_test]
    fn test_approve_then_transfer_by_spender() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");

        claim_eq!(state.approve(&ALICE, &BOB, &token(1)), Ok(ALICE));
        claim_eq!(state.get_approved(&token(1)), Ok(BOB));

        claim_eq!(state.transfer(&BOB, &ALICE, &CAROL, &token(1)), Ok(()));

        claim_eq!(state.owner_of(&token(1)), Ok(CAROL));
        claim_eq!(state.balance_of(&ALICE), Ok(0));
        claim_eq!(state.balance_of(&CAROL), Ok(1));
        claim_eq!(state.get_approved(&token(1)), Ok(NULL_ADDRESS));

        // The approval did not survive, Bob cannot move the token again
        claim_eq!(
            state.transfer(&BOB, &CAROL, &BOB, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
    }

    #[concordium_test]
    fn test_approve_unknown_token() {
        let (mut state, _) = empty_state();

        claim_eq!(
            state.approve(&ALICE, &BOB, &token(1)),
            Err(CustomContractError::NotFound)
        );
        claim_eq!(
            state.get_approved(&token(1)),
            Err(CustomContractError::NotFound)
        );
    }

    #[concordium_test]
    fn test_approve_not_authorized() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");
        state.approve(&ALICE, &BOB, &token(1)).expect_report("Failed to approve");

        // An approved spender cannot approve others
        claim_eq!(
            state.approve(&BOB, &CAROL, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(state.get_approved(&token(1)), Ok(BOB));
    }

    #[concordium_test]
    fn test_approve_by_operator_and_revoke() {
        let (mut state, mut state_builder) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");
        state.set_approval_for_all(&ALICE, &BOB, true, &mut state_builder);

        claim_eq!(state.approve(&BOB, &CAROL, &token(1)), Ok(ALICE));
        claim_eq!(state.get_approved(&token(1)), Ok(CAROL));

        // Direct overwrite with the null address revokes
        claim_eq!(state.approve(&ALICE, &NULL_ADDRESS, &token(1)), Ok(ALICE));
        claim_eq!(state.get_approved(&token(1)), Ok(NULL_ADDRESS));
        claim!(!state.is_authorized(&ALICE, &CAROL, &token(1)));
    }

    #[concordium_test]
    fn test_set_approval_for_all() {
        let (mut state, mut state_builder) = empty_state();

        state.set_approval_for_all(&ALICE, &BOB, true, &mut state_builder);
        claim!(state.is_operator(&ALICE, &BOB));
        claim!(!state.is_operator(&BOB, &ALICE));

        // Idempotent
        state.set_approval_for_all(&ALICE, &BOB, true, &mut state_builder);
        claim!(state.is_operator(&ALICE, &BOB));

        state.set_approval_for_all(&ALICE, &BOB, false, &mut state_builder);
        claim!(!state.is_operator(&ALICE, &BOB));

        state.set_approval_for_all(&CAROL, &BOB, false, &mut state_builder);
        claim!(!state.is_operator(&CAROL, &BOB));
    }

    #[concordium_test]
    fn test_operator_transfer_without_token_approval() {
        let (mut state, mut state_builder) = empty_state();
        state.set_approval_for_all(&ALICE, &BOB, true, &mut state_builder);
        state.mint(&ALICE, &token(2)).expect_report("Failed to mint token");

        claim_eq!(state.transfer(&BOB, &ALICE, &DAVE, &token(2)), Ok(()));

        claim_eq!(state.owner_of(&token(2)), Ok(DAVE));
        claim_balances_consistent(&state, &[ALICE, BOB, DAVE]);
    }

    #[concordium_test]
    fn test_transfer_wrong_from() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");

        claim_eq!(
            state.transfer(&BOB, &BOB, &CAROL, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(
            state.transfer(&ALICE, &BOB, &CAROL, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
        // Missing tokens have no owner to match
        claim_eq!(
            state.transfer(&ALICE, &ALICE, &CAROL, &token(9)),
            Err(CustomContractError::Unauthorized)
        );

        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_balances_consistent(&state, &[ALICE, BOB, CAROL]);
    }

    #[concordium_test]
    fn test_transfer_to_null_address() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");

        claim_eq!(
            state.transfer(&ALICE, &ALICE, &NULL_ADDRESS, &token(1)),
            Err(CustomContractError::InvalidArgument)
        );
        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_eq!(state.balance_of(&ALICE), Ok(1));
    }

    #[concordium_test]
    fn test_transfer_not_authorized() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");

        claim_eq!(
            state.transfer(&BOB, &ALICE, &BOB, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_balances_consistent(&state, &[ALICE, BOB]);
    }

    #[concordium_test]
    fn test_self_transfer() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");
        state.approve(&ALICE, &BOB, &token(1)).expect_report("Failed to approve");

        claim_eq!(state.transfer(&ALICE, &ALICE, &ALICE, &token(1)), Ok(()));

        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_eq!(state.balance_of(&ALICE), Ok(1));
        claim_eq!(state.get_approved(&token(1)), Ok(NULL_ADDRESS));
    }

    #[concordium_test]
    fn test_burn() {
        let (mut state, _) = empty_state();
        state.mint(&ALICE, &token(3)).expect_report("Failed to mint token");
        state.approve(&ALICE, &BOB, &token(3)).expect_report("Failed to approve");

        claim_eq!(state.burn(&ALICE, &token(3)), Ok(ALICE));

        claim_eq!(state.owner_of(&token(3)), Err(CustomContractError::NotFound));
        claim_eq!(state.balance_of(&ALICE), Ok(0));
        claim_eq!(state.token_approvals.get(&token(3)).is_none(), true);

        // No operating on a burnt token
        claim_eq!(
            state.burn(&ALICE, &token(3)),
            Err(CustomContractError::NotFound)
        );
        claim_eq!(
            state.transfer(&ALICE, &ALICE, &BOB, &token(3)),
            Err(CustomContractError::Unauthorized)
        );

        // A burnt ID can be minted again
        claim_eq!(state.mint(&BOB, &token(3)), Ok(()));
        claim_eq!(state.get_approved(&token(3)), Ok(NULL_ADDRESS));
    }

    #[concordium_test]
    fn test_burn_by_delegates() {
        let (mut state, mut state_builder) = empty_state();
        state.mint(&ALICE, &token(1)).expect_report("Failed to mint token");
        state.approve(&ALICE, &BOB, &token(1)).expect_report("Failed to approve");
        state.set_approval_for_all(&ALICE, &CAROL, true, &mut state_builder);

        claim_eq!(
            state.burn(&BOB, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(
            state.burn(&CAROL, &token(1)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(state.owner_of(&token(1)), Ok(ALICE));
        claim_eq!(state.balance_of(&ALICE), Ok(1));
    }

    #[concordium_test]
    fn test_balances_follow_ownership() {
        let (mut state, mut state_builder) = empty_state();
        let addresses = [ALICE, BOB, CAROL, DAVE];

        for id in 0..8u8 {
            let owner = addresses[(id % 2) as usize];
            state.mint(&owner, &token(id)).expect_report("Failed to mint token");
        }
        claim_balances_consistent(&state, &addresses);

        state.set_approval_for_all(&BOB, &CAROL, true, &mut state_builder);
        for id in 0..8u8 {
            let owner = state.owner_of(&token(id)).expect_report("Token should exist");
            let to = addresses[((id + 2) % 4) as usize];
            let sender = if owner == BOB { CAROL } else { owner };
            state
                .transfer(&sender, &owner, &to, &token(id))
                .expect_report("Transfer should succeed");
            claim_balances_consistent(&state, &addresses);
        }

        for id in (0..8u8).step_by(3) {
            let owner = state.owner_of(&token(id)).expect_report("Token should exist");
            state.burn(&owner, &token(id)).expect_report("Burn should succeed");
            claim_balances_consistent(&state, &addresses);
        }
    }
}
