use crate as pallet_token_router;

use pallet_token_router::{NonFungibleOps, SemiFungibleOps};

use polkadot_sdk::frame_support::traits::Currency;
use polkadot_sdk::frame_support::traits::fungibles::Mutate as FungiblesMutate;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU128, Get},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};

use primitives::{ALL_ITEMS, Balance, ecosystem::pallet_ids};
use std::cell::RefCell;
use std::collections::BTreeMap;

// Well-known call targets
pub const QUOTER: u64 = 3001;
pub const POOL: u64 = 3002;
pub const SINK: u64 = 3003;
pub const FAILER: u64 = 3004;
pub const PARTIAL_FAILER: u64 = 3005;
pub const DEALER: u64 = 3006;

// State containers for stateful mocks
thread_local! {
    // NFT ownership: (collection, item) -> owner
    pub static NFTS: RefCell<BTreeMap<(u32, u128), u64>> = const { RefCell::new(BTreeMap::new()) };

    // SFT balances: (collection, token, account) -> amount
    pub static SFTS: RefCell<BTreeMap<(u32, u128, u64), Balance>> = const { RefCell::new(BTreeMap::new()) };

    // Every dispatched external call: (target, payload, value)
    pub static CALL_LOG: RefCell<Vec<(u64, Vec<u8>, Balance)>> = const { RefCell::new(Vec::new()) };

    // Buffer the QUOTER target returns verbatim
    pub static QUOTE_BUFFER: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };

    // What the POOL target mints on call: (asset, recipient, amount)
    pub static POOL_PAYOUT: RefCell<Option<(u32, u64, Balance)>> = const { RefCell::new(None) };

    // What the DEALER target hands over on call
    pub static NFT_DEAL: RefCell<Option<(u32, u128, u64)>> = const { RefCell::new(None) };
    pub static SFT_DEAL: RefCell<Option<(u32, u128, u64, Balance)>> = const { RefCell::new(None) };
}

// Helper methods to setup state

pub fn word(amount: Balance) -> Vec<u8> {
  let mut w = [0u8; 32];
  w[16..].copy_from_slice(&amount.to_be_bytes());
  w.to_vec()
}

pub fn set_quote(amount: Balance) {
  QUOTE_BUFFER.with(|b| *b.borrow_mut() = word(amount));
}

pub fn set_quote_buffer(raw: Vec<u8>) {
  QUOTE_BUFFER.with(|b| *b.borrow_mut() = raw);
}

pub fn set_pool_payout(asset: u32, recipient: u64, amount: Balance) {
  POOL_PAYOUT.with(|p| *p.borrow_mut() = Some((asset, recipient, amount)));
}

pub fn set_nft_deal(collection: u32, item: u128, to: u64) {
  NFT_DEAL.with(|d| *d.borrow_mut() = Some((collection, item, to)));
}

pub fn set_sft_deal(collection: u32, token: u128, to: u64, amount: Balance) {
  SFT_DEAL.with(|d| *d.borrow_mut() = Some((collection, token, to, amount)));
}

pub fn mint_nft(collection: u32, item: u128, owner: u64) {
  NFTS.with(|n| {
    n.borrow_mut().insert((collection, item), owner);
  });
}

pub fn mint_sft(collection: u32, token: u128, owner: u64, amount: Balance) {
  SFTS.with(|s| {
    *s.borrow_mut().entry((collection, token, owner)).or_insert(0) += amount;
  });
}

pub fn get_call_log() -> Vec<(u64, Vec<u8>, Balance)> {
  CALL_LOG.with(|l| l.borrow().clone())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    TokenRouter: pallet_token_router,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

// MOCK IMPLEMENTATIONS

pub struct MockNonFungibles;
impl pallet_token_router::NonFungibleOps<u64> for MockNonFungibles {
  fn balance(collection: u32, item: u128, who: &u64) -> Balance {
    NFTS.with(|n| {
      let nfts = n.borrow();
      if item == ALL_ITEMS {
        nfts
          .iter()
          .filter(|((c, _), owner)| *c == collection && **owner == *who)
          .count() as Balance
      } else {
        match nfts.get(&(collection, item)) {
          Some(owner) if owner == who => 1,
          _ => 0,
        }
      }
    })
  }

  fn transfer(collection: u32, item: u128, from: &u64, to: &u64) -> Result<(), DispatchError> {
    NFTS.with(|n| {
      let mut nfts = n.borrow_mut();
      match nfts.get(&(collection, item)) {
        Some(owner) if owner == from => {
          nfts.insert((collection, item), *to);
          Ok(())
        }
        _ => Err(DispatchError::Other("NotItemOwner")),
      }
    })
  }
}

pub struct MockSemiFungibles;
impl pallet_token_router::SemiFungibleOps<u64> for MockSemiFungibles {
  fn balance(collection: u32, token: u128, who: &u64) -> Balance {
    SFTS.with(|s| {
      s.borrow()
        .get(&(collection, token, *who))
        .cloned()
        .unwrap_or(0)
    })
  }

  fn transfer(
    collection: u32,
    token: u128,
    from: &u64,
    to: &u64,
    amount: Balance,
  ) -> Result<(), DispatchError> {
    SFTS.with(|s| {
      let mut sfts = s.borrow_mut();
      let held = sfts.get(&(collection, token, *from)).cloned().unwrap_or(0);
      if held < amount {
        return Err(DispatchError::Other("InsufficientTokenBalance"));
      }
      sfts.insert((collection, token, *from), held - amount);
      *sfts.entry((collection, token, *to)).or_insert(0) += amount;
      Ok(())
    })
  }
}

pub struct MockDispatcher;
impl pallet_token_router::CallDispatcher<u64> for MockDispatcher {
  fn call(target: &u64, payload: &[u8], value: Balance) -> Result<Vec<u8>, DispatchError> {
    CALL_LOG.with(|l| l.borrow_mut().push((*target, payload.to_vec(), value)));
    match *target {
      QUOTER => Ok(QUOTE_BUFFER.with(|b| b.borrow().clone())),
      POOL => {
        let (asset, recipient, amount) = POOL_PAYOUT
          .with(|p| p.borrow().clone())
          .ok_or(DispatchError::Other("PoolNotConfigured"))?;
        <Assets as FungiblesMutate<u64>>::mint_into(asset, &recipient, amount)?;
        Ok(word(amount))
      }
      SINK => Ok(Vec::new()),
      FAILER => Err(DispatchError::Other("TargetReverted")),
      PARTIAL_FAILER => {
        // Visible side effect before failing, for rollback assertions
        <Assets as FungiblesMutate<u64>>::mint_into(7, &2, 1_000)?;
        Err(DispatchError::Other("TargetReverted"))
      }
      DEALER => {
        if let Some((collection, item, to)) = NFT_DEAL.with(|d| d.borrow().clone()) {
          MockNonFungibles::transfer(collection, item, &DEALER, &to)?;
        }
        if let Some((collection, token, to, amount)) = SFT_DEAL.with(|d| d.borrow().clone()) {
          MockSemiFungibles::transfer(collection, token, &DEALER, &to, amount)?;
        }
        Ok(Vec::new())
      }
      _ => Err(DispatchError::Other("UnknownTarget")),
    }
  }
}

pub struct RouterPalletId;
impl Get<PalletId> for RouterPalletId {
  fn get() -> PalletId {
    PalletId(*pallet_ids::TOKEN_ROUTER_PALLET_ID)
  }
}

impl pallet_token_router::Config for Test {
  type Currency = Balances;
  type Assets = Assets;
  type NonFungibles = MockNonFungibles;
  type SemiFungibles = MockSemiFungibles;
  type Dispatcher = MockDispatcher;
  type PalletId = RouterPalletId;
  type MaxActions = ConstU32<16>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = RouterBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct RouterBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl pallet_token_router::BenchmarkHelper<u64> for RouterBenchmarkHelper {
  fn create_fungible(asset: u32) -> polkadot_sdk::sp_runtime::DispatchResult {
    let _ = Assets::force_create(frame_system::RawOrigin::Root.into(), asset, 1, true, 1);
    Ok(())
  }

  fn mint_fungible(asset: u32, to: &u64, amount: Balance) -> polkadot_sdk::sp_runtime::DispatchResult {
    Assets::mint_into(asset, to, amount)?;
    Ok(())
  }
}

pub fn router_account() -> u64 {
  TokenRouter::account_id()
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let ext = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  let mut ext: polkadot_sdk::sp_io::TestExternalities = ext.into();

  // Reset thread locals
  NFTS.with(|n| n.borrow_mut().clear());
  SFTS.with(|s| s.borrow_mut().clear());
  CALL_LOG.with(|l| l.borrow_mut().clear());
  QUOTE_BUFFER.with(|b| b.borrow_mut().clear());
  POOL_PAYOUT.with(|p| *p.borrow_mut() = None);
  NFT_DEAL.with(|d| *d.borrow_mut() = None);
  SFT_DEAL.with(|d| *d.borrow_mut() = None);

  ext.execute_with(|| {
    // Pre-fund users, the router, and the call targets with native balance
    // so non-sufficient asset accounts can be created for them
    for acc in [1u64, 2, 3, QUOTER, POOL, SINK, FAILER, PARTIAL_FAILER, DEALER] {
      let _ = Balances::deposit_creating(&acc, 1_000);
    }
    let _ = Balances::deposit_creating(&router_account(), 1_000_000);

    // Create test assets and mint initial balances (account 1 is creator)
    for asset_id in 1..=10 {
      let _ = Assets::create(RuntimeOrigin::signed(1), asset_id, 1, 1);
      let _ = Assets::mint_into(asset_id, &1, 100_000);
      let _ = Assets::mint_into(asset_id, &2, 100_000);
    }

    // Seed the dealer with items and semi-fungible stock
    mint_nft(5, 1, DEALER);
    mint_nft(5, 2, DEALER);
    mint_nft(5, 3, DEALER);
    mint_sft(9, 42, DEALER, 500);
  });
  ext
}
