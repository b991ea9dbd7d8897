extern crate alloc;

use crate::{types::BenchmarkHelper, *};
use alloc::{vec, vec::Vec};
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::BoundedVec;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::AssetRef;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn execute(n: Linear<1, 8>) {
    let caller: T::AccountId = whitelisted_caller();
    let recipient: T::AccountId = account("recipient", 0, 0);
    let amount: Balance = 1_000;

    let mut actions: Vec<ActionOf<T>> = Vec::new();
    for i in 0..n {
      // Fresh ids so the helper creates them as sufficient assets
      let asset_id = 100 + i;
      T::BenchmarkHelper::create_fungible(asset_id).expect("Failed to create asset");
      T::BenchmarkHelper::mint_fungible(asset_id, &caller, amount * 10)
        .expect("Failed to mint asset");
      actions.push(Action {
        kind: ActionKind::Input,
        target: caller.clone(),
        payload: BoundedVec::new(),
        tokens: vec![TokenSpec {
          asset: AssetRef::Fungible { asset: asset_id },
          amount,
          source: AmountSource::Fixed,
          recipient: Some(recipient.clone()),
        }]
        .try_into()
        .expect("one spec fits"),
      });
    }
    let actions: BoundedVec<_, T::MaxActions> = actions.try_into().expect("within MaxActions");

    #[extrinsic_call]
    execute(RawOrigin::Signed(caller), actions, 0);

    assert_eq!(
      Pallet::<T>::asset_balance(&AssetRef::Fungible { asset: 100 }, &recipient),
      amount
    );
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
