//! Simulated multi-asset price paths.
//!
//! # Memory Layout
//!
//! Points are stored row-major: `data[t * dim + i]` is asset `i` at step
//! `t`, with `t = 0` holding the initial spot vector.

/// One simulated path of N asset prices over steps 0..=n.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationPath {
    dim: usize,
    data: Vec<f64>,
}

impl SimulationPath {
    /// Starts a path at `initial`, reserving room for `n_steps` more points.
    pub fn new(initial: &[f64], n_steps: usize) -> Self {
        let mut data = Vec::with_capacity(initial.len() * (n_steps + 1));
        data.extend_from_slice(initial);
        Self {
            dim: initial.len(),
            data,
        }
    }

    /// Appends the next point.
    pub(crate) fn push(&mut self, point: &[f64]) {
        debug_assert_eq!(point.len(), self.dim);
        self.data.extend_from_slice(point);
    }

    /// Number of assets.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored points (n + 1 once complete).
    #[inline]
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    /// True for a path with no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Asset prices at step `t`.
    #[inline]
    pub fn point(&self, t: usize) -> Option<&[f64]> {
        self.data.get(t * self.dim..(t + 1) * self.dim)
    }

    /// Asset prices at t = 0.
    pub fn initial(&self) -> &[f64] {
        &self.data[..self.dim.min(self.data.len())]
    }

    /// Asset prices at the last stored step.
    pub fn terminal(&self) -> &[f64] {
        let start = self.data.len().saturating_sub(self.dim);
        &self.data[start..]
    }

    /// Prices of one asset over time.
    pub fn asset(&self, asset: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.chunks_exact(self.dim.max(1)).map(move |row| row[asset])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let mut path = SimulationPath::new(&[30.0, 31.0], 2);
        assert_eq!(path.len(), 1);
        assert_eq!(path.initial(), &[30.0, 31.0]);
        assert_eq!(path.terminal(), &[30.0, 31.0]);

        path.push(&[30.5, 30.8]);
        path.push(&[31.0, 32.0]);

        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert_eq!(path.dim(), 2);
        assert_eq!(path.point(1), Some(&[30.5, 30.8][..]));
        assert_eq!(path.point(3), None);
        assert_eq!(path.terminal(), &[31.0, 32.0]);
        assert_eq!(path.asset(1).collect::<Vec<_>>(), vec![31.0, 30.8, 32.0]);
    }
}
