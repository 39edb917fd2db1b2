use std::cmp::Ordering;

use laborrag_core::{Error, Result};

/// Exact squared-L2 index. Row `i` is the vector of corpus position `i`.
#[derive(Debug, Clone, Default)]
pub struct FlatL2Index {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatL2Index {
    /// An empty index; its dimension is fixed by the first `add`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends vectors as the next rows. Every vector must match the index
    /// dimension.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for v in vectors {
            if self.dim == 0 && self.vectors.is_empty() {
                self.dim = v.len();
            }
            if v.len() != self.dim {
                return Err(Error::DimensionMismatch { expected: self.dim, actual: v.len() });
            }
            self.vectors.push(v);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The `k` nearest rows as `(squared distance, position)`, ascending by
    /// distance with ties broken by position. `k` is clamped to the index
    /// size.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, actual: query.len() });
        }
        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(pos, v)| (squared_l2(query, v), pos))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));
        scored.truncate(k.min(self.len()));
        Ok(scored)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance() {
        assert_eq!(squared_l2(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_l2(&[1.0], &[1.0]), 0.0);
    }
}
