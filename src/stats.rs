//! Symbol statistics: probability counts and the cumulative slot partition.
//!
//! Every symbol owns the half-open slot range `[cdf_start, cdf_start + probability)`
//! inside `[0, total)`. Ranges are laid out back to back following one fixed
//! [`SymbolOrder`], so the ranges of all symbols partition the slot space exactly.
//! The encoder looks symbols up by value and the decoder looks them up by slot.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::error::{Error, Result};

/// How symbols are ordered when their slot ranges are assigned.
///
/// Encoder and decoder must agree on the order bit for bit, so it is part of a
/// table's identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SymbolOrder {
    /// Ranges follow the order in which `(symbol, probability)` pairs were supplied.
    #[default]
    Insertion,
    /// Ranges follow the symbols' `Ord` order.
    Sorted,
}

/// Per-symbol statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolStat<S> {
    /// The coded value.
    pub symbol: S,
    /// Number of slots owned by the symbol (always at least 1).
    pub probability: u64,
    /// First slot owned by the symbol.
    pub cdf_start: u64,
}

impl<S> SymbolStat<S> {
    /// One past the last slot owned by the symbol.
    pub fn cdf_end(&self) -> u64 {
        self.cdf_start + self.probability
    }

    /// Whether `slot` falls inside this symbol's range.
    pub fn contains(&self, slot: u64) -> bool {
        self.cdf_start <= slot && slot < self.cdf_end()
    }
}

/// Immutable table of symbol statistics shared by encoder and decoder.
#[derive(Clone, Debug)]
pub struct StatisticsTable<S> {
    /// Entries in slot order.
    stats: Vec<SymbolStat<S>>,
    /// Symbol -> position in `stats`.
    index: HashMap<S, usize>,
    /// `cdf_start` of each entry; ascending, first is 0.
    starts: Vec<u64>,
    total: u64,
    order: SymbolOrder,
}

impl<S> StatisticsTable<S>
where
    S: Eq + Hash + Clone + Debug,
{
    /// Build a table from `(symbol, probability)` pairs, assigning slot ranges in
    /// the order the pairs are supplied.
    ///
    /// # Errors
    /// Returns [`Error::InvalidStatistics`] if no pairs are supplied, a probability
    /// is zero, a symbol repeats, the counts overflow `u64`, or the total is below 2.
    pub fn new<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        Self::build(pairs.into_iter().collect(), SymbolOrder::Insertion)
    }

    /// Count occurrences in `symbols` and build a table from the counts.
    ///
    /// Symbols are ordered by first appearance.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let mut counts: Vec<(S, u64)> = Vec::new();
        let mut seen: HashMap<S, usize> = HashMap::new();
        for symbol in symbols {
            match seen.get(&symbol) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    seen.insert(symbol.clone(), counts.len());
                    counts.push((symbol, 1));
                }
            }
        }
        Self::build(counts, SymbolOrder::Insertion)
    }

    fn build(pairs: Vec<(S, u64)>, order: SymbolOrder) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::invalid_statistics("empty alphabet"));
        }

        let mut stats = Vec::with_capacity(pairs.len());
        let mut index = HashMap::with_capacity(pairs.len());
        let mut starts = Vec::with_capacity(pairs.len());
        let mut total = 0u64;

        for (symbol, probability) in pairs {
            if probability == 0 {
                return Err(Error::invalid_statistics(format!(
                    "symbol {symbol:?} has zero probability"
                )));
            }
            if index.contains_key(&symbol) {
                return Err(Error::invalid_statistics(format!(
                    "duplicate symbol {symbol:?}"
                )));
            }
            let cdf_start = total;
            total = total
                .checked_add(probability)
                .ok_or_else(|| Error::invalid_statistics("total count overflows u64"))?;

            index.insert(symbol.clone(), stats.len());
            starts.push(cdf_start);
            stats.push(SymbolStat {
                symbol,
                probability,
                cdf_start,
            });
        }

        // A single slot leaves decode no room to make progress.
        if total < 2 {
            return Err(Error::invalid_statistics(format!(
                "total count {total} must be at least 2"
            )));
        }

        debug!(symbols = stats.len(), total, ?order, "built statistics table");

        Ok(Self {
            stats,
            index,
            starts,
            total,
            order,
        })
    }

    /// `(probability, cdf_start)` of `symbol`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownSymbol`] if `symbol` is not in the alphabet.
    pub fn stat_of(&self, symbol: &S) -> Result<(u64, u64)> {
        self.get(symbol)
            .map(|stat| (stat.probability, stat.cdf_start))
            .ok_or_else(|| Error::UnknownSymbol {
                symbol: format!("{symbol:?}"),
            })
    }

    /// Full statistics of `symbol`, if present.
    pub fn get(&self, symbol: &S) -> Option<&SymbolStat<S>> {
        self.index.get(symbol).map(|&i| &self.stats[i])
    }

    /// Whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }
}

impl<S> StatisticsTable<S>
where
    S: Ord + Hash + Clone + Debug,
{
    /// Build a table with an explicit [`SymbolOrder`].
    pub fn with_order<I>(pairs: I, order: SymbolOrder) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut pairs: Vec<(S, u64)> = pairs.into_iter().collect();
        if order == SymbolOrder::Sorted {
            // Stable, so duplicates stay adjacent and are still rejected by `build`.
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
        }
        Self::build(pairs, order)
    }
}

impl<S> StatisticsTable<S> {
    /// The statistics of the symbol owning `slot`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `slot >= total`.
    pub fn symbol_at(&self, slot: u64) -> Result<&SymbolStat<S>> {
        if slot >= self.total {
            return Err(Error::OutOfRange {
                slot,
                total: self.total,
            });
        }
        // Greatest cdf_start <= slot.
        let idx = self.starts.partition_point(|&start| start <= slot);
        match idx.checked_sub(1).map(|i| &self.stats[i]) {
            Some(stat) if stat.contains(slot) => Ok(stat),
            _ => Err(Error::OutOfRange {
                slot,
                total: self.total,
            }),
        }
    }

    /// Sum of all probabilities; the size of the slot space.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of symbols in the alphabet.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Always `false`: construction rejects empty alphabets.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// The ordering used to assign slot ranges.
    pub fn order(&self) -> SymbolOrder {
        self.order
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolStat<S>> {
        self.stats.iter()
    }

    /// Shannon entropy of the table in bits per symbol.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total as f64;
        self.stats
            .iter()
            .map(|stat| {
                let p = stat.probability as f64 / total;
                -p * p.log2()
            })
            .sum()
    }

    /// Ideal code length of one occurrence of the entry, in bits.
    fn cost_bits(&self, stat: &SymbolStat<S>) -> f64 {
        (self.total as f64 / stat.probability as f64).log2()
    }
}

impl<S> StatisticsTable<S>
where
    S: Eq + Hash + Clone + Debug,
{
    /// Information content of `symbols` under this table, in bits.
    ///
    /// This is the lower bound the encoder's output size approaches.
    pub fn information_bits<'a, I>(&self, symbols: I) -> Result<f64>
    where
        S: 'a,
        I: IntoIterator<Item = &'a S>,
    {
        symbols.into_iter().try_fold(0.0, |bits, symbol| {
            let stat = self.get(symbol).ok_or_else(|| Error::UnknownSymbol {
                symbol: format!("{symbol:?}"),
            })?;
            Ok(bits + self.cost_bits(stat))
        })
    }
}
