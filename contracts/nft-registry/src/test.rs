//! Mocks for contracts receiving tokens through `safeTransfer`.
use commons::{OnReceivingNftParams, RECEIVED_ACKNOWLEDGMENT};
use concordium_std::test_infrastructure::MockFn;
use concordium_std::*;

/// Receive hook that parses the parameter, passes it to `check` together with
/// the registry state and replies with `acknowledgment` if the check holds.
/// Traps otherwise.
pub fn receive_hook_mock<S>(
    check: impl Fn(&OnReceivingNftParams, &S) -> bool + 'static,
    acknowledgment: impl Clone + Serial + 'static,
) -> MockFn<S> {
    MockFn::new(move |parameter, _amount, _balance, state: &mut S| {
        let value = OnReceivingNftParams::deserial(&mut Cursor::new(parameter))
            .map_err(|_| CallContractError::Trap)?;
        if !check(&value, state) {
            return Err(CallContractError::Trap);
        };
        Ok((false, Some(acknowledgment.clone())))
    })
}

/// Receive hook accepting every token.
pub fn accepting_hook_mock<S>() -> MockFn<S> {
    receive_hook_mock(|_, _| true, RECEIVED_ACKNOWLEDGMENT)
}

/// Receive hook that succeeds without returning any value.
pub fn silent_hook_mock<S>() -> MockFn<S> {
    MockFn::new(|_parameter, _amount, _balance, _state| Ok((false, None::<u32>)))
}

/// Receive hook failing with the given call error.
pub fn failing_hook_mock<S>(error: fn() -> CallContractError<u32>) -> MockFn<S> {
    MockFn::new(move |_parameter, _amount, _balance, _state| {
        Err::<(bool, Option<u32>), _>(error())
    })
}
