//! Types, errors and constants shared by the NFT registry contract and the
//! contracts receiving its tokens.
#![cfg_attr(not(feature = "std"), no_std)]
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod errors;
mod types;

pub use self::{constants::*, errors::*, types::*};
