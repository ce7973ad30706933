//! Dense distance matrix.

use crate::models::Customer;

/// A dense n×n distance matrix stored in row-major order.
///
/// Index 0 is the depot; indices `1..n` are customers.
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::Customer;
/// use abc_cvrp::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Zero matrix over `size` locations.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Euclidean distances between every pair of locations, depot first.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let n = customers.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = customers[i].distance_to(&customers[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Wraps a row-major `size`×`size` grid, or `None` on a length mismatch.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if every entry is zero (all locations coincide).
    pub fn is_all_zero(&self) -> bool {
        self.data.iter().all(|&d| d == 0.0)
    }

    /// Returns the index into `positions` of the location closest to `to`.
    ///
    /// Ties go to the first position found. Returns `None` if `positions`
    /// is empty.
    ///
    /// ```
    /// use abc_cvrp::distance::DistanceMatrix;
    ///
    /// let dm = DistanceMatrix::from_data(3, vec![
    ///     0.0, 1.0, 2.0,
    ///     1.0, 0.0, 1.0,
    ///     2.0, 1.0, 0.0,
    /// ]).unwrap();
    /// // Vehicles parked at locations 0 and 2 are equally far from 1.
    /// assert_eq!(dm.nearest_position(1, &[0, 2]), Some(0));
    /// assert_eq!(dm.nearest_position(2, &[0, 1]), Some(1));
    /// ```
    pub fn nearest_position(&self, to: usize, positions: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &at) in positions.iter().enumerate() {
            let d = self.get(at, to);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((idx, d)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}
