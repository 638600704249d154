//! Registry of uniquely identified, non-fungible tokens.
//!
//! Every token has exactly one owner. Owners may approve a single spender per
//! token or an operator for all of their tokens. `safeTransfer` to a contract
//! requires the receiving contract to acknowledge the token.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
#[concordium_std::concordium_cfg_test]
mod test;
