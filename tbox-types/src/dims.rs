use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A dimension a bounding box may populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dim {
    /// Value span of a temporal number.
    Value,
    X,
    Y,
    Z,
    Time,
}

/// The set of populated dimensions of a box, in canonical order.
///
/// # Examples
///
/// ```
/// use tbox_types::dims::{Dim, Dimensions};
///
/// let dims: Dimensions = [Dim::Time, Dim::Value].into_iter().collect();
/// assert_eq!(dims.iter().collect::<Vec<_>>(), vec![Dim::Value, Dim::Time]);
/// assert!(dims.contains(Dim::Time));
/// assert!(!dims.contains(Dim::Z));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    dims: SmallVec<[Dim; 4]>,
}

impl Dimensions {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dim: Dim) {
        if let Err(pos) = self.dims.binary_search(&dim) {
            self.dims.insert(pos, dim);
        }
    }

    pub fn contains(&self, dim: Dim) -> bool {
        self.dims.binary_search(&dim).is_ok()
    }

    pub fn len(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Dim> + '_ {
        self.dims.iter().copied()
    }
}

impl FromIterator<Dim> for Dimensions {
    fn from_iter<I: IntoIterator<Item = Dim>>(iter: I) -> Self {
        let mut dims = Self::empty();
        for dim in iter {
            dims.insert(dim);
        }
        dims
    }
}
