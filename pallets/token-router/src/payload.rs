//! Bounds-checked byte operations on result buffers and call payloads.
//!
//! Dynamic amounts travel as 32-byte big-endian words inside result buffers,
//! and payloads may end with a reserved placeholder tail that gets replaced
//! by the most recent result buffer before dispatch. Everything here works on
//! owned or borrowed byte slices; out-of-range reads are errors, never
//! zero-padded.

use scale_info::prelude::vec::Vec;

use primitives::Balance;
use primitives::payload::{RESULT_PLACEHOLDER, WORD, offset_word};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadError {
  /// The buffer ends before `offset + 32`.
  OutOfBounds,
  /// The word holds a value wider than the balance type, so it necessarily
  /// exceeds any declared ceiling.
  Overflow,
}

/// Read one 32-byte big-endian word from `buf` at byte `offset` as a balance.
pub fn read_result_word(buf: &[u8], offset: u32) -> Result<Balance, ReadError> {
  let start = offset as usize;
  let end = start.checked_add(WORD).ok_or(ReadError::OutOfBounds)?;
  let word = buf.get(start..end).ok_or(ReadError::OutOfBounds)?;
  if word[..WORD / 2].iter().any(|b| *b != 0) {
    return Err(ReadError::Overflow);
  }
  let mut lower = [0u8; WORD / 2];
  lower.copy_from_slice(&word[WORD / 2..]);
  Ok(Balance::from_be_bytes(lower))
}

fn length_word(len: usize) -> [u8; WORD] {
  let mut word = [0u8; WORD];
  word[WORD / 2..].copy_from_slice(&(len as u128).to_be_bytes());
  word
}

/// Splice the most recent result buffer into a payload carrying a
/// placeholder tail.
///
/// A well-formed tail is the final two words `(32, RESULT_PLACEHOLDER)`. The
/// sentinel word is replaced by `length_word(last_result.len()) ++
/// last_result`; every byte before it, including the offset word, is
/// preserved verbatim. Returns `None` when the payload carries no tail, in
/// which case it must go out unchanged.
pub fn splice_result(payload: &[u8], last_result: &[u8]) -> Option<Vec<u8>> {
  if payload.len() < 2 * WORD {
    return None;
  }
  let sentinel_at = payload.len() - WORD;
  let offset_at = sentinel_at - WORD;
  if payload[sentinel_at..] != RESULT_PLACEHOLDER
    || payload[offset_at..sentinel_at] != offset_word()
  {
    return None;
  }
  let mut spliced = Vec::with_capacity(sentinel_at + WORD + last_result.len());
  spliced.extend_from_slice(&payload[..sentinel_at]);
  spliced.extend_from_slice(&length_word(last_result.len()));
  spliced.extend_from_slice(last_result);
  Some(spliced)
}
