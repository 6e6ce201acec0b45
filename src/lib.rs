//! # Finite State Entropy (FSE), reference edition
//!
//! *Entropy coding into one big integer, with nothing hidden.*
//!
//! ## Intuition First
//!
//! Writing a number in base 10 is a way of stacking digits: every new digit
//! multiplies the number by 10 and adds something in `0..10`. Every digit costs
//! the same, `log2(10)` bits.
//!
//! FSE (a member of the Asymmetric Numeral Systems family) stacks digits of
//! *different* widths. A symbol that owns `p` of the `total` slots only
//! multiplies the number by about `total / p`, so frequent symbols are cheap and
//! rare symbols are expensive. That is exactly the `-log2(p / total)` cost
//! entropy coding asks for.
//!
//! ## The Problem
//!
//! Production FSE (zstd, LZFSE) keeps its state inside a machine word and
//! streams bits out as the state grows. Renormalisation, power-of-two totals and
//! spread tables make it fast but obscure the arithmetic underneath.
//!
//! This crate keeps the arithmetic and drops the engineering. The state is a
//! [`num::BigUint`] that simply keeps growing, so no bits are ever flushed and
//! the transform is a plain bijection between symbol sequences and integers.
//!
//! ## Mathematical Formulation
//!
//! Given counts `p_s` with cumulative starts `c_s` and `total = Σ p_s`, one
//! encoding step maps state `x` and symbol `s` to
//!
//! ```text
//! C(x, s) = total * floor(x / p_s) + (x mod p_s) + c_s + 1
//! ```
//!
//! and decoding inverts it from `(x - 1) mod total`, which names the slot and
//! therefore the symbol. See [`fse`] for the details.
//!
//! ## Complexity Analysis
//!
//! - **Time**: one bignum division and multiplication per symbol; `O(n²)` word
//!   operations for a message of `n` symbols, because the state grows linearly.
//! - **Space**: the state is about `Σ -log2(p_s / total)` bits.
//! - **Lookup**: `O(1)` symbol -> stats (hash map), `O(log |alphabet|)` slot ->
//!   symbol (binary search).
//!
//! ## Usage
//!
//! ```
//! use fse::{FseCoder, StatisticsTable};
//!
//! let table = StatisticsTable::new([('a', 5), ('b', 2), ('c', 1)]).unwrap();
//! let coder = FseCoder::new(table);
//!
//! let value = coder.encode("abacab".chars()).unwrap();
//! let decoded: String = coder.decode(&value).unwrap().into_iter().collect();
//! assert_eq!(decoded, "abacab");
//! ```
//!
//! ## References
//!
//! - Duda, J. (2013). "Asymmetric numeral systems: entropy coding combining speed of Huffman coding with compression rate of arithmetic coding."
//! - Collet, Y. (2013). "Finite State Entropy - A new breed of entropy coder."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fse;
pub mod stats;

pub use error::{Error, Result};
pub use fse::{decode, decode_signed, encode, FseCoder};
pub use stats::{StatisticsTable, SymbolOrder, SymbolStat};
