//! Finite State Entropy over a single arbitrary-precision integer.
//!
//! The whole message lives in one [`BigUint`] state. Encoding a symbol with
//! probability `p` and cumulative start `c` (out of `total` slots) rewrites the
//! state's lowest radix-`p` digit as a radix-`total` digit inside the symbol's
//! slot range:
//!
//! ```text
//! (q, r) = divmod(x, p)
//! x'     = total * q + c + r + 1
//! ```
//!
//! Decoding runs the step backwards:
//!
//! ```text
//! (q, slot) = divmod(x' - 1, total)
//! s         = owner of slot
//! x         = p_s * q + (slot - c_s)
//! ```
//!
//! The `+ 1` makes the digits bijective (like bijective base-k numerals): state
//! `0` is the empty message and every step grows the state strictly. Without
//! it, the symbol whose range starts at slot 0 would map `0` to `0` and a
//! leading run of it would vanish. With it, every non-negative integer decodes
//! to exactly one message, and encoding that message gives the integer back.
//!
//! Symbols come back out last-in first-out, so the decoder collects them in
//! reverse and flips the result.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use num::bigint::Sign;
use num::{BigInt, BigUint, Integer, One, Zero};
use tracing::trace;

use crate::error::{Error, Result};
use crate::stats::StatisticsTable;

/// Encode `symbols` into a single integer.
///
/// The empty sequence encodes to `0`.
///
/// # Errors
/// Returns [`Error::UnknownSymbol`] if any symbol is missing from `table`.
/// Nothing is returned for the symbols before it.
pub fn encode<S, I>(table: &StatisticsTable<S>, symbols: I) -> Result<BigUint>
where
    S: Eq + Hash + Clone + Debug,
    I: IntoIterator,
    I::Item: Borrow<S>,
{
    let total = BigUint::from(table.total());
    let mut len = 0usize;
    let state = symbols
        .into_iter()
        .try_fold(BigUint::zero(), |state, symbol| {
            let (probability, cdf_start) = table.stat_of(symbol.borrow())?;
            len += 1;
            Ok::<_, Error>(push(state, &total, probability, cdf_start))
        })?;
    trace!(symbols = len, bits = state.bits(), "encoded");
    Ok(state)
}

fn push(state: BigUint, total: &BigUint, probability: u64, cdf_start: u64) -> BigUint {
    let (q, r) = state.div_rem(&BigUint::from(probability));
    q * total + r + cdf_start + 1u32
}

/// Decode an integer produced by [`encode`] with the same table.
///
/// Every non-negative integer is a valid input; `0` decodes to the empty sequence.
///
/// # Errors
/// Returns [`Error::UnknownSlot`] if a slot has no owner, which only a broken
/// partition can cause.
pub fn decode<S: Clone>(table: &StatisticsTable<S>, value: &BigUint) -> Result<Vec<S>> {
    let total = BigUint::from(table.total());
    let mut state = value.clone();
    let mut symbols = Vec::new();

    while !state.is_zero() {
        let (q, r) = (state - BigUint::one()).div_rem(&total);
        // r < total <= u64::MAX, so it has at most one u64 digit.
        let slot = r.iter_u64_digits().next().unwrap_or(0);
        let stat = table
            .symbol_at(slot)
            .map_err(|_| Error::UnknownSlot { slot })?;
        state = q * BigUint::from(stat.probability) + (slot - stat.cdf_start);
        symbols.push(stat.symbol.clone());
    }

    symbols.reverse();
    trace!(symbols = symbols.len(), bits = value.bits(), "decoded");
    Ok(symbols)
}

/// [`decode`] for a signed integer.
///
/// # Errors
/// Returns [`Error::InvalidEncoding`] if `value` is negative.
pub fn decode_signed<S: Clone>(table: &StatisticsTable<S>, value: &BigInt) -> Result<Vec<S>> {
    if value.sign() == Sign::Minus {
        return Err(Error::InvalidEncoding {
            value: value.to_string(),
        });
    }
    decode(table, value.magnitude())
}

/// An FSE coder bound to one statistics table.
#[derive(Clone, Debug)]
pub struct FseCoder<S> {
    table: StatisticsTable<S>,
}

impl<S> FseCoder<S>
where
    S: Eq + Hash + Clone + Debug,
{
    /// Create a coder over `table`.
    pub fn new(table: StatisticsTable<S>) -> Self {
        Self { table }
    }

    /// Create a coder whose table counts the symbols of `sample`.
    pub fn from_sample<I>(sample: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        StatisticsTable::from_symbols(sample).map(Self::new)
    }

    /// The coder's statistics.
    pub fn table(&self) -> &StatisticsTable<S> {
        &self.table
    }

    /// See [`encode`].
    pub fn encode<I>(&self, symbols: I) -> Result<BigUint>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        encode(&self.table, symbols)
    }

    /// See [`decode`].
    pub fn decode(&self, value: &BigUint) -> Result<Vec<S>> {
        decode(&self.table, value)
    }

    /// See [`decode_signed`].
    pub fn decode_signed(&self, value: &BigInt) -> Result<Vec<S>> {
        decode_signed(&self.table, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ab() -> StatisticsTable<char> {
        StatisticsTable::new([('A', 3), ('B', 1)]).unwrap()
    }

    #[test]
    fn test_empty_sequence() {
        let table = ab();
        let empty: [char; 0] = [];
        assert_eq!(encode(&table, empty).unwrap(), BigUint::zero());
        assert!(decode(&table, &BigUint::zero()).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbols() {
        let table = ab();
        // A: 4*0 + 0 + 0 + 1, B: 4*0 + 0 + 3 + 1
        assert_eq!(encode(&table, ['A']).unwrap(), BigUint::from(1u32));
        assert_eq!(encode(&table, ['B']).unwrap(), BigUint::from(4u32));
        assert_eq!(decode(&table, &BigUint::from(1u32)).unwrap(), vec!['A']);
        assert_eq!(decode(&table, &BigUint::from(4u32)).unwrap(), vec!['B']);
    }

    #[test]
    fn test_leading_zero_slot_symbol_survives() {
        let table = ab();
        for input in [vec!['A'], vec!['A', 'A', 'A'], vec!['A', 'B', 'A', 'A']] {
            let value = encode(&table, &input).unwrap();
            assert_eq!(decode(&table, &value).unwrap(), input);
        }
    }

    #[test]
    fn test_small_values_decode_and_reencode() {
        let table = ab();
        for v in 0u32..200 {
            let value = BigUint::from(v);
            let symbols = decode(&table, &value).unwrap();
            assert_eq!(encode(&table, &symbols).unwrap(), value);
        }
    }

    #[test]
    fn test_unknown_symbol() {
        let table = ab();
        let err = encode(&table, ['A', 'C']).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownSymbol {
                symbol: "'C'".to_string()
            }
        );
    }

    #[test]
    fn test_negative_input_rejected() {
        let table = ab();
        let err = decode_signed(&table, &BigInt::from(-5)).unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding { .. }));
        assert_eq!(
            decode_signed(&table, &BigInt::from(4)).unwrap(),
            vec!['B']
        );
    }

    #[test]
    fn test_rare_symbols_cost_more() {
        let table = StatisticsTable::new([(b'x', 13u64), (b'y', 2), (b'z', 1)]).unwrap();
        for n in 1..40 {
            let common = encode(&table, vec![b'x'; n]).unwrap();
            let rare = encode(&table, vec![b'z'; n]).unwrap();
            assert!(rare > common, "n = {n}");
        }
    }

    #[test]
    fn test_size_tracks_information_content() {
        let text = "Huffman coding is limited to 1 bit per symbol. FSE can a symbol as a fraction of a bit.";
        let coder = FseCoder::from_sample(text.chars()).unwrap();
        let symbols: Vec<char> = text.chars().collect();
        let value = coder.encode(&symbols).unwrap();
        let bound = coder.table().information_bits(&symbols).unwrap();
        let bits = value.bits() as f64;
        assert!(bits <= bound + 16.0, "{bits} bits vs bound {bound}");
        assert!(bits < 8.0 * symbols.len() as f64);
        assert_eq!(coder.decode(&value).unwrap(), symbols);
    }

    #[test]
    fn test_coder_roundtrip_texts() {
        for text in ["Hello, world!", "abracadabra", "aaaaaaaab"] {
            let coder = FseCoder::from_sample(text.chars()).unwrap();
            let value = coder.encode(text.chars()).unwrap();
            let decoded: String = coder.decode(&value).unwrap().into_iter().collect();
            assert_eq!(decoded, text);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_fse_roundtrip(
            counts in prop::collection::vec(1u64..64, 2..12),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..80),
        ) {
            let table = StatisticsTable::new(counts.iter().copied().enumerate()).unwrap();
            let input: Vec<usize> = picks.iter().map(|i| i.index(counts.len())).collect();
            let value = encode(&table, &input).unwrap();
            prop_assert_eq!(decode(&table, &value).unwrap(), input);
        }

        #[test]
        fn prop_every_integer_decodes(
            counts in prop::collection::vec(1u64..16, 2..6),
            bytes in prop::collection::vec(any::<u8>(), 0..24),
        ) {
            let table = StatisticsTable::new(counts.iter().copied().enumerate()).unwrap();
            let value = BigUint::from_bytes_be(&bytes);
            let symbols = decode(&table, &value).unwrap();
            prop_assert_eq!(encode(&table, &symbols).unwrap(), value);
        }
    }
}
