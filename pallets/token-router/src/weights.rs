#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn execute(actions: u32) -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
  fn execute(actions: u32) -> Weight {
    // Base covers attach + verification pass + refund; each action adds an
    // external call plus up to MaxActionTokens transfers/snapshots.
    let actions = u64::from(actions);
    Weight::from_parts(
      30_000_000u64.saturating_add(actions.saturating_mul(60_000_000)),
      2600u64.saturating_add(actions.saturating_mul(512)),
    )
    .saturating_add(T::DbWeight::get().reads_writes(
      2u64.saturating_add(actions.saturating_mul(6)),
      2u64.saturating_add(actions.saturating_mul(4)),
    ))
  }
}

impl WeightInfo for () {
  fn execute(actions: u32) -> Weight {
    let actions = u64::from(actions);
    Weight::from_parts(
      30_000_000u64.saturating_add(actions.saturating_mul(60_000_000)),
      2600u64.saturating_add(actions.saturating_mul(512)),
    )
    .saturating_add(RocksDbWeight::get().reads_writes(
      2u64.saturating_add(actions.saturating_mul(6)),
      2u64.saturating_add(actions.saturating_mul(4)),
    ))
  }
}
