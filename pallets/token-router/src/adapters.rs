//! Adapter traits for the token router's external collaborators.
//!
//! The router assumes nothing about the runtime beyond the ability to query
//! balances, move assets, and hand a raw payload to a target. Native and
//! fungible assets bind directly to `Currency`/`fungibles` in the pallet
//! config; the remaining collaborators are abstracted here so the pallet
//! stays fully generic over how a runtime hosts them.

use polkadot_sdk::frame_support::pallet_prelude::*;
use scale_info::prelude::vec::Vec;

use primitives::Balance;

/// Non-fungible asset operations.
///
/// `balance` with `item == ALL_ITEMS` must return the aggregate number of
/// items `who` holds in the collection; for a concrete item it returns 1 or 0
/// depending on ownership.
pub trait NonFungibleOps<AccountId> {
  fn balance(collection: u32, item: u128, who: &AccountId) -> Balance;

  fn transfer(collection: u32, item: u128, from: &AccountId, to: &AccountId) -> DispatchResult;
}

/// Semi-fungible asset operations: per-(collection, token) balances with
/// divisible amounts.
pub trait SemiFungibleOps<AccountId> {
  fn balance(collection: u32, token: u128, who: &AccountId) -> Balance;

  fn transfer(
    collection: u32,
    token: u128,
    from: &AccountId,
    to: &AccountId,
    amount: Balance,
  ) -> DispatchResult;
}

/// External call surface for output actions.
///
/// `value` is the native amount the router has already credited to `target`
/// for this call; it is informational for the callee. The returned bytes
/// become the invocation's new result buffer.
pub trait CallDispatcher<AccountId> {
  fn call(target: &AccountId, payload: &[u8], value: Balance) -> Result<Vec<u8>, DispatchError>;
}

/// No-op `NonFungibleOps` for configurations without non-fungible assets.
impl<AccountId> NonFungibleOps<AccountId> for () {
  fn balance(_: u32, _: u128, _: &AccountId) -> Balance {
    0
  }

  fn transfer(_: u32, _: u128, _: &AccountId, _: &AccountId) -> DispatchResult {
    Err(DispatchError::Unavailable)
  }
}

/// No-op `SemiFungibleOps` for configurations without semi-fungible assets.
impl<AccountId> SemiFungibleOps<AccountId> for () {
  fn balance(_: u32, _: u128, _: &AccountId) -> Balance {
    0
  }

  fn transfer(_: u32, _: u128, _: &AccountId, _: &AccountId, _: Balance) -> DispatchResult {
    Err(DispatchError::Unavailable)
  }
}

/// `CallDispatcher` that rejects every target, for configurations where the
/// router only moves assets.
impl<AccountId> CallDispatcher<AccountId> for () {
  fn call(_: &AccountId, _: &[u8], _: Balance) -> Result<Vec<u8>, DispatchError> {
    Err(DispatchError::Unavailable)
  }
}
