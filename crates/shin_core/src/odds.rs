//! Input adapters for ordered and labelled odds books.
//!
//! The solver only ever sees a flat array of odds. An [`OddsBook`] extracts
//! that array and later re-attaches the positions or keys to the computed
//! probabilities, so outputs line up with inputs.
//!
//! | Input | Output |
//! |-------|--------|
//! | `[f64]`, `[f64; N]`, `Vec<f64>` | `Vec<f64>` |
//! | `[(K, f64)]`, `Vec<(K, f64)>` | `Vec<(K, f64)>`, keys in input order |
//! | `BTreeMap<K, f64>` | `BTreeMap<K, f64>` |
//! | `HashMap<K, f64>` | `HashMap<K, f64>` |
//! | `IndexMap<K, f64>` (feature `indexmap`) | `IndexMap<K, f64>`, keys in insertion order |

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

#[cfg(feature = "indexmap")]
use indexmap::IndexMap;

/// A collection of decimal odds that knows how to shape its results.
pub trait OddsBook {
    /// Container returned in place of the odds.
    type Output;

    /// Odds values in iteration order.
    fn odds(&self) -> Vec<f64>;

    /// Pair `probabilities` (in the order returned by [`OddsBook::odds`])
    /// with this book's positions or keys.
    fn attach(&self, probabilities: Vec<f64>) -> Self::Output;
}

impl OddsBook for [f64] {
    type Output = Vec<f64>;

    fn odds(&self) -> Vec<f64> {
        self.to_vec()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        probabilities
    }
}

impl OddsBook for Vec<f64> {
    type Output = Vec<f64>;

    fn odds(&self) -> Vec<f64> {
        self.clone()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        probabilities
    }
}

impl<const N: usize> OddsBook for [f64; N] {
    type Output = Vec<f64>;

    fn odds(&self) -> Vec<f64> {
        self.to_vec()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        probabilities
    }
}

impl<K: Clone> OddsBook for [(K, f64)] {
    type Output = Vec<(K, f64)>;

    fn odds(&self) -> Vec<f64> {
        self.iter().map(|(_, o)| *o).collect()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        self.iter()
            .map(|(k, _)| k.clone())
            .zip(probabilities)
            .collect()
    }
}

impl<K: Clone> OddsBook for Vec<(K, f64)> {
    type Output = Vec<(K, f64)>;

    fn odds(&self) -> Vec<f64> {
        self.as_slice().odds()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        self.as_slice().attach(probabilities)
    }
}

impl<K: Clone + Ord> OddsBook for BTreeMap<K, f64> {
    type Output = BTreeMap<K, f64>;

    fn odds(&self) -> Vec<f64> {
        self.values().copied().collect()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        self.keys().cloned().zip(probabilities).collect()
    }
}

impl<K, S> OddsBook for HashMap<K, f64, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    type Output = HashMap<K, f64, S>;

    // Iteration order is stable for an unmodified map, so `odds` and
    // `attach` see the keys in the same sequence.
    fn odds(&self) -> Vec<f64> {
        self.values().copied().collect()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        let mut out = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        out.extend(self.keys().cloned().zip(probabilities));
        out
    }
}

#[cfg(feature = "indexmap")]
impl<K, S> OddsBook for IndexMap<K, f64, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    type Output = IndexMap<K, f64, S>;

    fn odds(&self) -> Vec<f64> {
        self.values().copied().collect()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        let mut out = IndexMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        out.extend(self.keys().cloned().zip(probabilities));
        out
    }
}

impl<B: OddsBook + ?Sized> OddsBook for &B {
    type Output = B::Output;

    fn odds(&self) -> Vec<f64> {
        (**self).odds()
    }

    fn attach(&self, probabilities: Vec<f64>) -> Self::Output {
        (**self).attach(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_roundtrip_positions() {
        let odds = [2.6, 2.4, 4.3];
        assert_eq!(odds[..].odds(), vec![2.6, 2.4, 4.3]);
        assert_eq!(odds.attach(vec![0.1, 0.2, 0.7]), vec![0.1, 0.2, 0.7]);
    }

    #[test]
    fn test_labelled_preserves_insertion_order() {
        let book = vec![("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)];
        assert_eq!(book.odds(), vec![2.6, 2.4, 4.3]);
        let out = book.attach(vec![0.37, 0.40, 0.23]);
        assert_eq!(out, vec![("HOME", 0.37), ("AWAY", 0.40), ("DRAW", 0.23)]);
    }

    #[test]
    fn test_btreemap_keys_preserved() {
        let book: BTreeMap<&str, f64> = [("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)]
            .into_iter()
            .collect();
        // BTreeMap iterates AWAY, DRAW, HOME
        assert_eq!(book.odds(), vec![2.4, 4.3, 2.6]);
        let out = book.attach(vec![0.40, 0.23, 0.37]);
        assert_eq!(out["HOME"], 0.37);
        assert_eq!(out["AWAY"], 0.40);
        assert_eq!(out["DRAW"], 0.23);
    }

    #[test]
    fn test_hashmap_values_follow_keys() {
        let book: HashMap<String, f64> = [("a", 2.0), ("b", 4.0), ("c", 8.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        // Feed each odds value back as its own "probability"
        let out = book.attach(book.odds());
        assert_eq!(out.len(), 3);
        for (k, v) in &book {
            assert_eq!(out[k], *v);
        }
    }

    #[cfg(feature = "indexmap")]
    #[test]
    fn test_indexmap_keeps_insertion_order() {
        let book: IndexMap<&str, f64> = [("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)]
            .into_iter()
            .collect();
        assert_eq!(book.odds(), vec![2.6, 2.4, 4.3]);
        let out = book.attach(vec![0.37, 0.40, 0.23]);
        assert_eq!(out.keys().copied().collect::<Vec<_>>(), vec!["HOME", "AWAY", "DRAW"]);
        assert_eq!(out["AWAY"], 0.40);
    }

    #[test]
    fn test_reference_delegates() {
        let odds = vec![1.5, 2.5];
        let by_ref: &Vec<f64> = &odds;
        assert_eq!(by_ref.odds(), odds);
    }
}
