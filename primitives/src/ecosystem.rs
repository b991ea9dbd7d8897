//! System-level constants for the token router.
//!
//! Centralizes the balance type, pallet identifiers, and the byte-level
//! conventions shared between the router and anything that builds payloads
//! for it. These constants are the single source of truth and are re-used
//! across runtime configurations via the primitives crate.

/// Balance type alias for consistency across the ecosystem
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// These IDs are used by Polkadot SDK's `PalletId::into_account_truncating()`
/// to deterministically generate accounts for pallet-specific operations.
pub mod pallet_ids {
  /// Token Router pallet ID (atomic multi-asset action engine)
  pub const TOKEN_ROUTER_PALLET_ID: &[u8; 8] = b"tokenrtr";
}

/// Byte-level payload conventions.
///
/// Dynamic amounts and spliced result buffers travel as 32-byte big-endian
/// words inside raw call payloads; these constants pin that layout.
pub mod payload {
  use hex_literal::hex;

  /// Width in bytes of one payload word.
  pub const WORD: usize = 32;

  /// Reserved sentinel word marking the splice point for the most recent
  /// result buffer.
  ///
  /// A payload whose final word equals this constant, preceded by a word
  /// encoding `32`, has the sentinel replaced with the length-prefixed result
  /// buffer before dispatch. The value is an agreed convention with no other
  /// meaning; payload builders must never emit it as data.
  pub const RESULT_PLACEHOLDER: [u8; 32] =
    hex!("d2f3c8e1a4b596071829e3c4d5a6f7b8091a2b3c4d5e6f708192a3b4c5d6e7f8");

  /// Big-endian word encoding of the fixed offset `32` that precedes the
  /// sentinel in a well-formed placeholder tail.
  pub fn offset_word() -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = WORD as u8;
    word
  }
}
