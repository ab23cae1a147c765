//! Topology - N-dimensional index/coordinate conversion and neighborhoods.
//!
//! Both the input space and the column space of a spatial pooler are
//! described by a list of dimensions (e.g. `[32, 32]` for a 2-D image, or
//! `[2048]` for a flat vector). A `Topology` converts between a flat index
//! and an N-D coordinate vector over such a space, and computes the set of
//! flat indices within a given radius of a center point.

use std::collections::BTreeSet;

/// Converts between flat indices and N-D coordinates for a fixed set of
/// dimensions, and computes neighborhoods over that space.
///
/// Dimensions are in row-major ("C") order: the first dimension is the most
/// significant when decomposing a flat index, matching the way `numpy`/NuPIC
/// lay out multi-dimensional SDR spaces.
///
/// # Examples
///
/// ```
/// use spatial_pooler::Topology;
///
/// let topo = Topology::new(vec![4, 3]);
/// assert_eq!(topo.num_elements(), 12);
/// assert_eq!(topo.compute_coordinates(5), vec![1, 2]);
/// assert_eq!(topo.compute_index(&[1, 2]), 5);
/// ```
#[derive(Clone, Debug)]
pub struct Topology {
    dimensions: Vec<usize>,
    strides: Vec<usize>,
    num_elements: usize,
}

impl Topology {
    /// Create a new `Topology` over the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `dimensions` is empty or contains a zero. Validating
    /// dimensions as a *configuration* error (rather than a panic) is
    /// `SpConfig::validate`'s job; by the time a `Topology` is constructed
    /// the dimensions are assumed already validated, so a violation here is a
    /// programmer error.
    pub fn new(dimensions: Vec<usize>) -> Self {
        assert!(!dimensions.is_empty(), "dimensions must not be empty");
        assert!(
            dimensions.iter().all(|&d| d > 0),
            "all dimensions must be positive"
        );

        let mut strides = vec![1usize; dimensions.len()];
        for i in (0..dimensions.len() - 1).rev() {
            strides[i] = strides[i + 1] * dimensions[i + 1];
        }

        let num_elements = dimensions.iter().product();

        Self {
            dimensions,
            strides,
            num_elements,
        }
    }

    /// The dimensions this topology was built from.
    #[inline]
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Number of dimensions.
    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// Total number of elements (product of all dimensions).
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Decompose a flat index into its N-D coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_elements()` (programmer error, per spec.md
    /// §4.1 "invalid coordinate -> unrecoverable").
    pub fn compute_coordinates(&self, index: usize) -> Vec<usize> {
        assert!(index < self.num_elements, "index out of bounds");

        let mut remaining = index;
        let mut coord = vec![0usize; self.dimensions.len()];
        for i in 0..self.dimensions.len() {
            coord[i] = remaining / self.strides[i];
            remaining %= self.strides[i];
        }
        coord
    }

    /// Compose an N-D coordinate back into a flat index.
    ///
    /// # Panics
    ///
    /// Panics if `coord.len() != num_dimensions()` or a component is out of
    /// range for its dimension.
    pub fn compute_index(&self, coord: &[usize]) -> usize {
        assert_eq!(coord.len(), self.dimensions.len(), "coordinate rank mismatch");

        let mut index = 0;
        for i in 0..coord.len() {
            assert!(coord[i] < self.dimensions[i], "coordinate out of range");
            index += coord[i] * self.strides[i];
        }
        index
    }

    /// Compute the set of flat indices within `radius` of `center`, excluding
    /// `center` itself, sorted ascending.
    ///
    /// Per dimension, the candidate coordinate range is
    /// `[center_d - radius, center_d + radius]`; if `wrap` is set each
    /// component is reduced modulo that dimension's size (wrapping toroidally),
    /// otherwise it is clipped to `[0, dim - 1]`. The neighbor set is the
    /// deduplicated Cartesian product of the per-dimension candidate sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use spatial_pooler::Topology;
    ///
    /// let topo = Topology::new(vec![10]);
    /// let neighbors = topo.neighbors_nd(0, 3, true);
    /// assert_eq!(neighbors, vec![1, 2, 3, 7, 8, 9]);
    /// ```
    pub fn neighbors_nd(&self, center: usize, radius: usize, wrap: bool) -> Vec<usize> {
        let center_coord = self.compute_coordinates(center);
        let ndim = self.dimensions.len();

        let mut per_dim_values: Vec<Vec<usize>> = Vec::with_capacity(ndim);
        for d in 0..ndim {
            let dim = self.dimensions[d] as i64;
            let c = center_coord[d] as i64;
            let lo = c - radius as i64;
            let hi = c + radius as i64;

            let mut set = BTreeSet::new();
            for v in lo..=hi {
                let coord_val = if wrap {
                    (((v % dim) + dim) % dim) as usize
                } else {
                    v.clamp(0, dim - 1) as usize
                };
                set.insert(coord_val);
            }
            per_dim_values.push(set.into_iter().collect());
        }

        let mut results = Vec::new();
        let mut combo = vec![0usize; ndim];
        Self::cartesian_product(&per_dim_values, 0, &mut combo, &mut results, self);

        results.retain(|&idx| idx != center);
        results.sort_unstable();
        results.dedup();
        results
    }

    fn cartesian_product(
        per_dim_values: &[Vec<usize>],
        dim: usize,
        combo: &mut [usize],
        results: &mut Vec<usize>,
        topo: &Topology,
    ) {
        if dim == per_dim_values.len() {
            results.push(topo.compute_index(combo));
            return;
        }
        for &val in &per_dim_values[dim] {
            combo[dim] = val;
            Self::cartesian_product(per_dim_values, dim + 1, combo, results, topo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_1d_round_trip() {
        let topo = Topology::new(vec![32]);
        for i in 0..32 {
            let coord = topo.compute_coordinates(i);
            assert_eq!(topo.compute_index(&coord), i);
        }
    }

    #[test]
    fn test_2d_round_trip() {
        let topo = Topology::new(vec![4, 5]);
        for i in 0..20 {
            let coord = topo.compute_coordinates(i);
            assert_eq!(coord.len(), 2);
            assert_eq!(topo.compute_index(&coord), i);
        }
    }

    #[test]
    fn test_2d_row_major_layout() {
        // dims = [rows=4, cols=5]; index 5 should be row 1, col 0
        let topo = Topology::new(vec![4, 5]);
        assert_eq!(topo.compute_coordinates(5), vec![1, 0]);
        assert_eq!(topo.compute_coordinates(7), vec![1, 2]);
        assert_eq!(topo.compute_index(&[1, 2]), 7);
    }

    #[test]
    fn test_wrap_around_neighborhood_scenario() {
        // spec.md scenario 3: inputDim=[10], radius=3, center=0, wrap
        // candidates (inclusive of center) are {7,8,9,0,1,2,3} (7 entries)
        let topo = Topology::new(vec![10]);
        let neighbors = topo.neighbors_nd(0, 3, true);
        assert_eq!(neighbors, vec![1, 2, 3, 7, 8, 9]);
        // candidate set including center has 7 entries
        assert_eq!(neighbors.len() + 1, 7);
    }

    #[test]
    fn test_no_wrap_clips_at_edges() {
        let topo = Topology::new(vec![10]);
        let neighbors = topo.neighbors_nd(0, 3, false);
        // clipped to [0, 9], excluding center 0
        assert_eq!(neighbors, vec![1, 2, 3]);
    }

    #[test]
    fn test_neighbors_excludes_center() {
        let topo = Topology::new(vec![20]);
        let neighbors = topo.neighbors_nd(10, 2, false);
        assert!(!neighbors.contains(&10));
    }

    #[test]
    fn test_neighbors_2d_no_wrap() {
        let topo = Topology::new(vec![5, 5]);
        let center = topo.compute_index(&[2, 2]);
        let neighbors = topo.neighbors_nd(center, 1, false);
        // a full interior 3x3 neighborhood minus the center = 8
        assert_eq!(neighbors.len(), 8);
    }

    #[test]
    fn test_neighbors_sorted_unique() {
        let topo = Topology::new(vec![8, 8]);
        let center = topo.compute_index(&[0, 0]);
        let neighbors = topo.neighbors_nd(center, 2, true);
        let mut sorted = neighbors.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(neighbors, sorted);
    }

    #[test]
    #[should_panic]
    fn test_compute_coordinates_out_of_bounds_panics() {
        let topo = Topology::new(vec![4]);
        topo.compute_coordinates(4);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_zero_dimension() {
        Topology::new(vec![4, 0]);
    }
}
