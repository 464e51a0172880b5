//! Retained lattice layers.

/// Immutable lattice history, layers ordered from t = 0 to t = T.
///
/// Layer `k` holds `k + 1` node values, lowest node first. A tree built
/// from an n-step lattice therefore has `n + 1` layers, the first being the
/// single root node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PriceTree {
    layers: Vec<Vec<f64>>,
}

impl PriceTree {
    /// Wraps time-ascending layers.
    pub(crate) fn from_layers(layers: Vec<Vec<f64>>) -> Self {
        debug_assert!(layers.iter().enumerate().all(|(k, l)| l.len() == k + 1));
        Self { layers }
    }

    /// All layers, root first.
    #[inline]
    pub fn layers(&self) -> &[Vec<f64>] {
        &self.layers
    }

    /// Layer at time step `k`, if it exists.
    #[inline]
    pub fn layer(&self, k: usize) -> Option<&[f64]> {
        self.layers.get(k).map(Vec::as_slice)
    }

    /// Root node value at t = 0.
    pub fn root(&self) -> Option<f64> {
        self.layers.first().and_then(|l| l.first()).copied()
    }

    /// Terminal layer at t = T.
    pub fn terminal(&self) -> &[f64] {
        self.layers.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of layers (n + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when no layer is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let tree = PriceTree::from_layers(vec![vec![1.0], vec![0.5, 2.0], vec![0.25, 1.0, 4.0]]);
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), Some(1.0));
        assert_eq!(tree.terminal(), &[0.25, 1.0, 4.0]);
        assert_eq!(tree.layer(1), Some(&[0.5, 2.0][..]));
        assert_eq!(tree.layer(3), None);
    }
}
