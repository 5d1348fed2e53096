//! Multi-entry R*-tree index over temporal numbers.
//!
//! Each value is decomposed into up to `max_boxes_per_value` boxes, and every
//! box becomes one tree entry over (value, time). Queries prune by envelope,
//! refine with exact [`TBox`] overlap, and report each value once.
//!
//! # Example
//!
//! ```rust
//! use tbox::index::MultiEntryIndex;
//! use tbox::{Config, Instant, Interpolation, Number, Sequence, Span, TBox, TemporalType, Timestamp, Value};
//!
//! let mut index = MultiEntryIndex::new(Config::default().with_max_boxes_per_value(4))?;
//!
//! let instants = (0..20)
//!     .map(|i| Instant::new(TemporalType::TFloat, Value::Float((i % 5) as f64), Timestamp::from_secs(i)))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let seq = Sequence::new(instants, true, true, Interpolation::Linear)?;
//! assert_eq!(index.insert(7, &seq.into())?, 4);
//!
//! let query = TBox::from_span(Span::new(Number::Float(3.5), Number::Float(10.0), true, true).unwrap());
//! assert_eq!(index.query_overlapping(&query), vec![7]);
//! # Ok::<(), tbox::TBoxError>(())
//! ```

use crate::compute::decompose::decompose;
use crate::config::{BoundingBox, BoxPredicates, Config, TBox};
use crate::error::{Result, TBoxError};
use crate::temporal::{DomainKind, Instant, Interpolation, Sequence, Temporal};
use rstar::{AABB, RTree};
use rustc_hash::{FxHashMap, FxHashSet};

/// One box of an indexed value.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedTBox {
    pub min_value: f64,
    pub max_value: f64,
    pub min_t: f64,
    pub max_t: f64,
    pub key: u64,
    pub tbox: TBox,
}

impl IndexedTBox {
    fn new(key: u64, tbox: TBox) -> Self {
        let [min_value, min_t] = lower_corner(&tbox);
        let [max_value, max_t] = upper_corner(&tbox);
        Self {
            min_value,
            max_value,
            min_t,
            max_t,
            key,
            tbox,
        }
    }
}

impl rstar::RTreeObject for IndexedTBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_value, self.min_t], [self.max_value, self.max_t])
    }
}

// A missing dimension spans the whole axis.
fn lower_corner(tbox: &TBox) -> [f64; 2] {
    [
        tbox.span().map_or(f64::MIN, |s| s.lower().as_f64()),
        tbox.period().map_or(f64::MIN, |p| p.lower().micros() as f64),
    ]
}

fn upper_corner(tbox: &TBox) -> [f64; 2] {
    [
        tbox.span().map_or(f64::MAX, |s| s.upper().as_f64()),
        tbox.period().map_or(f64::MAX, |p| p.upper().micros() as f64),
    ]
}

/// Index of temporal numbers keyed by caller-supplied ids.
pub struct MultiEntryIndex {
    config: Config,
    tree: RTree<IndexedTBox>,
    // Entries per key, for removal
    key_map: FxHashMap<u64, Vec<IndexedTBox>>,
}

impl MultiEntryIndex {
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(TBoxError::Config)?;
        Ok(Self {
            config,
            tree: RTree::new(),
            key_map: FxHashMap::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index `temp` under `key`, replacing any value already stored there.
    ///
    /// Returns the number of entries added.
    pub fn insert(&mut self, key: u64, temp: &Temporal) -> Result<usize> {
        if temp.domain() != DomainKind::Number {
            return Err(TBoxError::invalid_input(format!(
                "Only temporal numbers can be indexed, got {}",
                temp.temporal_type()
            )));
        }
        let boxes = decompose(temp, self.config.max_boxes_per_value)?;
        let entries = boxes
            .iter()
            .map(|bbox| match bbox {
                BoundingBox::Number(tbox) => Ok(IndexedTBox::new(key, *tbox)),
                other => Err(TBoxError::internal_type(other.kind().to_string(), "index_insert")),
            })
            .collect::<Result<Vec<_>>>()?;

        self.remove(key);
        log::debug!("Indexing key {} with {} entries", key, entries.len());
        for entry in &entries {
            self.tree.insert(entry.clone());
        }
        let count = entries.len();
        self.key_map.insert(key, entries);
        Ok(count)
    }

    /// Build a sequence from raw instants and index it under `key`.
    ///
    /// The instants are checked as `config.validation` says; trusted mode
    /// skips the ordering and domain checks.
    pub fn insert_instants(
        &mut self,
        key: u64,
        instants: Vec<Instant>,
        lower_inc: bool,
        upper_inc: bool,
        interp: Interpolation,
    ) -> Result<usize> {
        let validation = self.config.validation;
        let seq = Sequence::with_validation(instants, lower_inc, upper_inc, interp, validation)?;
        self.insert(key, &seq.into())
    }

    /// Remove every entry of `key`. Returns whether the key was present.
    pub fn remove(&mut self, key: u64) -> bool {
        let Some(entries) = self.key_map.remove(&key) else {
            return false;
        };
        for entry in &entries {
            self.tree.remove(entry);
        }
        true
    }

    /// Keys of the values with a box overlapping `query`, in ascending order.
    pub fn query_overlapping(&self, query: &TBox) -> Vec<u64> {
        let envelope = AABB::from_corners(lower_corner(query), upper_corner(query));
        let mut seen = FxHashSet::default();
        let mut keys: Vec<u64> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.tbox.overlaps(query))
            .filter_map(|entry| seen.insert(entry.key).then_some(entry.key))
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.key_map.contains_key(&key)
    }

    pub fn stats(&self) -> MultiEntryIndexStats {
        MultiEntryIndexStats {
            values: self.key_map.len(),
            entries: self.tree.size(),
        }
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.key_map.clear();
    }
}

impl Default for MultiEntryIndex {
    fn default() -> Self {
        Self {
            config: Config::default(),
            tree: RTree::new(),
            key_map: FxHashMap::default(),
        }
    }
}

/// Statistics about a multi-entry index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiEntryIndexStats {
    /// Number of indexed values
    pub values: usize,
    /// Total number of tree entries across all values
    pub entries: usize,
}
