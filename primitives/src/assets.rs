use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Reserved item id on a [`AssetRef::NonFungible`] reference.
///
/// In a balance query it selects the aggregate count of all items the holder
/// owns in the collection instead of a single item's presence. It is not a
/// transferable item: the router rejects transfer specs carrying it.
pub const ALL_ITEMS: u128 = u128::MAX;

/// Asset class tag. The set is closed; every transfer and balance query is
/// exhaustively matched over it.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetClass {
  Native,
  Fungible,
  NonFungible,
  SemiFungible,
}

/// A specific asset or asset unit the router can move or measure.
///
/// This enum serves as the single source of truth for asset identity across
/// the router and its adapters; each variant carries exactly the identifiers
/// its class needs.
///
/// - `Native`: the system's native token (managed by pallet-balances).
/// - `Fungible`: a divisible asset identified by a pallet-assets id.
/// - `NonFungible`: one item in a collection, or the whole collection when
///   `item == ALL_ITEMS` (balance queries only).
/// - `SemiFungible`: a fungible token line inside a collection, with
///   per-(collection, token) balances.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetRef {
  #[default]
  Native,
  Fungible {
    asset: u32,
  },
  NonFungible {
    collection: u32,
    item: u128,
  },
  SemiFungible {
    collection: u32,
    token: u128,
  },
}

impl AssetRef {
  pub fn class(&self) -> AssetClass {
    match self {
      AssetRef::Native => AssetClass::Native,
      AssetRef::Fungible { .. } => AssetClass::Fungible,
      AssetRef::NonFungible { .. } => AssetClass::NonFungible,
      AssetRef::SemiFungible { .. } => AssetClass::SemiFungible,
    }
  }

  pub fn is_native(&self) -> bool {
    matches!(self, AssetRef::Native)
  }

  /// Whether this reference identifies something a transfer can move.
  ///
  /// The aggregate-count sentinel is a query-only construct.
  pub fn is_transferable(&self) -> bool {
    !matches!(self, AssetRef::NonFungible { item, .. } if *item == ALL_ITEMS)
  }
}

impl From<u32> for AssetRef {
  fn from(asset: u32) -> Self {
    AssetRef::Fungible { asset }
  }
}
