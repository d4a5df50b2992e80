//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::MtspError;

/// A dense n×n cost matrix stored in row-major order.
///
/// Costs must be finite and non-negative; symmetry is not required.
/// The matrix is immutable once built, so a single instance can back any
/// number of concurrent runs.
///
/// # Examples
///
/// ```
/// use u_mtsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
///
/// Deserialization goes through [`from_data`](Self::from_data), so a
/// malformed matrix is rejected when it is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

/// Unchecked wire form of [`DistanceMatrix`].
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    size: usize,
}

impl TryFrom<RawMatrix> for DistanceMatrix {
    type Error = MtspError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Self::from_data(raw.size, raw.data)
    }
}

impl DistanceMatrix {
    /// Computes a Euclidean distance matrix from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// Fails if the data length doesn't match `size * size` or if any
    /// entry is negative or non-finite.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, MtspError> {
        if size.checked_mul(size) != Some(data.len()) {
            return Err(MtspError::config(format!(
                "distance matrix has {} entries, expected {size}x{size}",
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(MtspError::config(format!(
                "distance ({}, {}) must be finite and non-negative, got {}",
                pos / size,
                pos % size,
                data[pos]
            )));
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Fails if the rows do not form a square matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MtspError> {
        let size = rows.len();
        if let Some(row) = rows.iter().position(|r| r.len() != size) {
            return Err(MtspError::config(format!(
                "distance matrix row {row} has {} columns, expected {size}",
                rows[row].len()
            )));
        }
        Self::from_data(size, rows.concat())
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sums the legs `cities[0] → cities[1] → … → cities[n-1]`.
    ///
    /// Empty and single-city paths cost nothing.
    pub fn path_length(&self, cities: &[usize]) -> f64 {
        cities
            .windows(2)
            .map(|leg| self.data[leg[0] * self.size + leg[1]])
            .sum()
    }
}
