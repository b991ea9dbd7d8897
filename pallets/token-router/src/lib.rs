//! Token Router Pallet
//!
//! Atomic execution engine for ordered lists of heterogeneous actions: input
//! actions pull declared assets from the caller, output actions invoke
//! external targets and assert minimum balance deltas on their recipients.
//! One invocation is all-or-nothing; verification runs strictly after the
//! whole list has executed.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::{CallDispatcher, NonFungibleOps, SemiFungibleOps};

pub mod payload;
pub mod types;
pub use types::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

#[frame::pallet]
pub mod pallet {
  use super::*;
  use crate::payload::{ReadError, read_result_word, splice_result};
  use frame::prelude::*;
  use polkadot_sdk::frame_support::{
    storage::with_storage_layer,
    traits::{Currency, ExistenceRequirement, fungibles, tokens::Preservation},
  };
  use polkadot_sdk::sp_runtime::traits::AccountIdConversion;
  use scale_info::prelude::vec::Vec;

  pub type ActionOf<T> = Action<<T as frame_system::Config>::AccountId>;
  pub type TokenSpecOf<T> = TokenSpec<<T as frame_system::Config>::AccountId>;

  #[pallet::config]
  pub trait Config: frame_system::Config {
    /// Native currency interface; holds attached value on the router account
    /// and settles native transfers and refunds.
    type Currency: frame::deps::frame_support::traits::Currency<Self::AccountId, Balance = Balance>;

    /// Fungible asset interface for `AssetRef::Fungible` specs.
    type Assets: frame::deps::frame_support::traits::fungibles::Inspect<
        Self::AccountId,
        AssetId = u32,
        Balance = Balance,
      > + frame::deps::frame_support::traits::fungibles::Mutate<Self::AccountId>;

    /// Non-fungible asset adapter.
    type NonFungibles: NonFungibleOps<Self::AccountId>;

    /// Semi-fungible asset adapter.
    type SemiFungibles: SemiFungibleOps<Self::AccountId>;

    /// External call surface for action targets.
    type Dispatcher: CallDispatcher<Self::AccountId>;

    /// Pallet ID for deriving the router's sovereign account.
    #[pallet::constant]
    type PalletId: Get<frame::deps::frame_support::PalletId>;

    /// Maximum actions per invocation.
    #[pallet::constant]
    type MaxActions: Get<u32>;

    /// Weight information
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::types::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Full action list executed and verified
    Executed { who: T::AccountId, actions: u32 },
    /// A best-effort output action failed; its effects were discarded and
    /// execution continued
    OptionalActionFailed { index: u32, error: DispatchError },
    /// Unspent native value returned to the caller
    NativeRefunded { who: T::AccountId, amount: Balance },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Dynamically resolved input amount exceeds the declared ceiling
    ExcessiveInputAmount,
    /// Post-execution balance delta below the declared minimum
    InsufficientOutputAmount,
    /// Asset reference unusable for the requested operation
    InvalidAssetClass,
    /// Dynamic amount read past the end of the result buffer
    ResultOutOfBounds,
    /// Token spec without a recipient outside the native carrier arm
    MissingRecipient,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Execute an ordered action list with `attached_native` drawn from the
    /// caller. The whole invocation commits or nothing does.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::execute(actions.len() as u32))]
    pub fn execute(
      origin: OriginFor<T>,
      actions: BoundedVec<ActionOf<T>, T::MaxActions>,
      attached_native: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      // Explicit layer so the engine is atomic even when invoked outside
      // the dispatch-level transactional wrapper.
      with_storage_layer(|| Self::do_execute(&who, &actions, attached_native))
    }
  }

  impl<T: Config> Pallet<T> {
    /// Get the router's sovereign account
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Sequential fold over the action list, then the verification pass,
    /// then the leftover-native refund.
    pub fn do_execute(
      who: &T::AccountId,
      actions: &[ActionOf<T>],
      attached_native: Balance,
    ) -> DispatchResult {
      let router = Self::account_id();
      let baseline = T::Currency::free_balance(&router);
      if attached_native > 0 {
        T::Currency::transfer(
          who,
          &router,
          attached_native,
          ExistenceRequirement::KeepAlive,
        )?;
      }
      let mut ctx = ExecutionContext::<T::AccountId>::default();
      for (index, action) in actions.iter().enumerate() {
        let index = index as u32;
        match action.kind {
          ActionKind::Input => Self::process_input(who, &router, action, &mut ctx)?,
          ActionKind::OutputMandatory | ActionKind::OutputOptional => {
            Self::process_output(index, &router, action, &mut ctx)?
          }
        }
      }
      Self::verify_outputs(&ctx)?;
      // Whatever native the invocation left on the router above its entry
      // balance goes back to the caller, donations included.
      let leftover = T::Currency::free_balance(&router).saturating_sub(baseline);
      if leftover > 0 {
        T::Currency::transfer(&router, who, leftover, ExistenceRequirement::AllowDeath)?;
        Self::deposit_event(Event::NativeRefunded {
          who: who.clone(),
          amount: leftover,
        });
      }
      Self::deposit_event(Event::Executed {
        who: who.clone(),
        actions: actions.len() as u32,
      });
      Ok(())
    }

    /// Pull every declared token from the caller, after optionally
    /// refreshing the result buffer with a zero-value call to the target.
    fn process_input(
      who: &T::AccountId,
      router: &T::AccountId,
      action: &ActionOf<T>,
      ctx: &mut ExecutionContext<T::AccountId>,
    ) -> DispatchResult {
      if !action.payload.is_empty() {
        // The fetch parameterizes transfers, so its failure is fatal.
        ctx.last_result = T::Dispatcher::call(&action.target, &action.payload, 0)?;
      }
      for spec in action.tokens.iter() {
        let amount = Self::resolve_amount(spec, &ctx.last_result)?;
        if amount == 0 {
          continue;
        }
        match (&spec.asset, &spec.recipient) {
          (AssetRef::Native, None) => {
            // Deferred native: parked on the router account, attached as
            // the value of the next output call.
            ctx.carried_value = Some(amount);
          }
          (AssetRef::Native, Some(to)) => {
            // Native inputs are prepaid through `attached_native`.
            T::Currency::transfer(router, to, amount, ExistenceRequirement::AllowDeath)?;
          }
          (_, Some(to)) => {
            Self::asset_transfer(&spec.asset, who, to, amount)?;
          }
          (_, None) => return Err(Error::<T>::MissingRecipient.into()),
        }
      }
      Ok(())
    }

    /// Snapshot recipient balances, splice the payload, and dispatch the
    /// external call with any carried native value.
    fn process_output(
      index: u32,
      router: &T::AccountId,
      action: &ActionOf<T>,
      ctx: &mut ExecutionContext<T::AccountId>,
    ) -> DispatchResult {
      for (token, spec) in action.tokens.iter().enumerate() {
        if spec.amount == 0 {
          continue;
        }
        let recipient = spec
          .recipient
          .clone()
          .ok_or(Error::<T>::MissingRecipient)?;
        let pre = Self::asset_balance(&spec.asset, &recipient);
        ctx.snapshots.push(BalanceSnapshot {
          action: index,
          token: token as u32,
          asset: spec.asset,
          recipient,
          minimum: spec.amount,
          pre,
        });
      }
      let data = match splice_result(&action.payload, &ctx.last_result) {
        Some(spliced) => spliced,
        None => action.payload.to_vec(),
      };
      // The carrier feeds exactly one call; taken even if that call fails.
      let value = ctx.carried_value.take().unwrap_or(0);
      let call_result: Result<Vec<u8>, DispatchError> = with_storage_layer(|| {
        if value > 0 {
          T::Currency::transfer(
            router,
            &action.target,
            value,
            ExistenceRequirement::AllowDeath,
          )?;
        }
        T::Dispatcher::call(&action.target, &data, value)
      });
      match call_result {
        Ok(result) => {
          ctx.last_result = result;
        }
        Err(error) => {
          if action.kind == ActionKind::OutputMandatory {
            return Err(error);
          }
          log::debug!(
            target: "runtime::token-router",
            "optional action {} failed: {:?}",
            index,
            error,
          );
          Self::deposit_event(Event::OptionalActionFailed { index, error });
        }
      }
      Ok(())
    }

    /// Resolve an input spec's transfer amount against the most recent
    /// result buffer, enforcing the declared ceiling.
    fn resolve_amount(spec: &TokenSpecOf<T>, last_result: &[u8]) -> Result<Balance, DispatchError> {
      match spec.source {
        AmountSource::Fixed => Ok(spec.amount),
        AmountSource::LastResult { offset } => {
          let value = read_result_word(last_result, offset).map_err(|e| match e {
            ReadError::OutOfBounds => Error::<T>::ResultOutOfBounds,
            ReadError::Overflow => Error::<T>::ExcessiveInputAmount,
          })?;
          ensure!(value <= spec.amount, Error::<T>::ExcessiveInputAmount);
          Ok(value)
        }
      }
    }

    /// Balance query, exhaustive over the closed asset-class set.
    pub fn asset_balance(asset: &AssetRef, who: &T::AccountId) -> Balance {
      match *asset {
        AssetRef::Native => T::Currency::free_balance(who),
        AssetRef::Fungible { asset } => {
          <T::Assets as fungibles::Inspect<T::AccountId>>::balance(asset, who)
        }
        AssetRef::NonFungible { collection, item } => {
          T::NonFungibles::balance(collection, item, who)
        }
        AssetRef::SemiFungible { collection, token } => {
          T::SemiFungibles::balance(collection, token, who)
        }
      }
    }

    /// Transfer dispatch, exhaustive over the closed asset-class set.
    pub fn asset_transfer(
      asset: &AssetRef,
      from: &T::AccountId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      ensure!(asset.is_transferable(), Error::<T>::InvalidAssetClass);
      match *asset {
        AssetRef::Native => {
          T::Currency::transfer(from, to, amount, ExistenceRequirement::KeepAlive)
        }
        AssetRef::Fungible { asset } => {
          <T::Assets as fungibles::Mutate<T::AccountId>>::transfer(
            asset,
            from,
            to,
            amount,
            Preservation::Expendable,
          )?;
          Ok(())
        }
        AssetRef::NonFungible { collection, item } => {
          // An item is indivisible; any other count is class confusion.
          ensure!(amount == 1, Error::<T>::InvalidAssetClass);
          T::NonFungibles::transfer(collection, item, from, to)
        }
        AssetRef::SemiFungible { collection, token } => {
          T::SemiFungibles::transfer(collection, token, from, to, amount)
        }
      }
    }

    /// Compare every recorded snapshot against the recipient's current
    /// balance. Runs strictly after the whole list so no callee, reentrant
    /// or otherwise, can bypass it.
    fn verify_outputs(ctx: &ExecutionContext<T::AccountId>) -> DispatchResult {
      for snap in ctx.snapshots.iter() {
        let post = Self::asset_balance(&snap.asset, &snap.recipient);
        ensure!(
          post.saturating_sub(snap.pre) >= snap.minimum,
          Error::<T>::InsufficientOutputAmount
        );
      }
      Ok(())
    }
  }

  /// Genesis configuration
  #[pallet::genesis_config]
  pub struct GenesisConfig<T: Config> {
    pub _marker: core::marker::PhantomData<T>,
  }

  impl<T: Config> Default for GenesisConfig<T> {
    fn default() -> Self {
      Self {
        _marker: Default::default(),
      }
    }
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      // Ensure the router account survives a zero native balance (ED-free)
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}
