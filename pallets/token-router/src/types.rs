use polkadot_sdk::frame_support::pallet_prelude::*;
use scale_info::prelude::vec::Vec;

pub use primitives::{ALL_ITEMS, AssetClass, AssetRef, Balance};

/// Upper bound on raw payload bytes per action.
pub type MaxPayloadLen = ConstU32<4096>;

/// Upper bound on token specs per action.
pub type MaxActionTokens = ConstU32<16>;

/// How an action participates in the list.
///
/// `Input` pulls declared assets from the caller. The two output kinds invoke
/// external logic and differ only in what a callee failure does to the rest
/// of the list: `OutputMandatory` aborts everything, `OutputOptional` is
/// best-effort and lets execution continue.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum ActionKind {
  Input,
  OutputMandatory,
  OutputOptional,
}

/// Where an input token spec's transfer amount comes from.
///
/// `Fixed` uses the declared amount as-is. `LastResult` reads a 32-byte
/// big-endian word from the most recent result buffer at the given byte
/// offset; the declared amount then acts as a hard ceiling on the value read.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum AmountSource {
  Fixed,
  LastResult { offset: u32 },
}

/// One asset movement or balance requirement inside an action.
///
/// In an input action `amount` is the exact amount (`Fixed`) or the ceiling
/// (`LastResult`). In an output action `amount` is the minimum balance
/// increase the recipient must see once the whole list has run; `source` is
/// ignored there.
///
/// `recipient: None` is only meaningful on a `Native` input spec: the
/// resolved amount is not transferred but parked in the carrier and attached
/// as the value of the next output call.
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub struct TokenSpec<AccountId> {
  pub asset: AssetRef,
  pub amount: Balance,
  pub source: AmountSource,
  pub recipient: Option<AccountId>,
}

/// One step of the ordered action list.
///
/// An input action with a non-empty payload first calls `target` with zero
/// attached value, purely to refresh the result buffer its own dynamic specs
/// read from. Output actions always call `target` with the (possibly
/// placeholder-spliced) payload.
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub struct Action<AccountId> {
  pub kind: ActionKind,
  pub target: AccountId,
  pub payload: BoundedVec<u8, MaxPayloadLen>,
  pub tokens: BoundedVec<TokenSpec<AccountId>, MaxActionTokens>,
}

/// Pre-balance recorded for one output token spec, checked after the whole
/// list has executed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceSnapshot<AccountId> {
  pub action: u32,
  pub token: u32,
  pub asset: AssetRef,
  pub recipient: AccountId,
  pub minimum: Balance,
  pub pre: Balance,
}

/// Transient state threaded through one invocation of the executor.
///
/// Owned by the sequential fold over the action list; constructed at entry,
/// dropped at return. Never persisted.
#[derive(Clone, Debug)]
pub struct ExecutionContext<AccountId> {
  /// Most recent result buffer returned by a target call.
  pub last_result: Vec<u8>,
  /// Native amount deferred by an input spec, consumed by exactly one
  /// output call.
  pub carried_value: Option<Balance>,
  /// Pre-balances awaiting the verification pass.
  pub snapshots: Vec<BalanceSnapshot<AccountId>>,
}

impl<AccountId> Default for ExecutionContext<AccountId> {
  fn default() -> Self {
    Self {
      last_result: Vec::new(),
      carried_value: None,
      snapshots: Vec::new(),
    }
  }
}

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn create_fungible(asset: u32) -> DispatchResult;
  fn mint_fungible(asset: u32, to: &AccountId, amount: Balance) -> DispatchResult;
}
