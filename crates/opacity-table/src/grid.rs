//! Dense cross-section storage.

/// Row-major `[P][T][W][G]` array of cross sections.
///
/// Line-by-line grids use a single g-point. Each (pressure, temperature)
/// cell owns one contiguous `[W][G]` slab; a cell counts as filled once its
/// slab has been written through [`CrossSectionGrid::slab_mut`].
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionGrid {
    data: Vec<f64>,
    pressures: usize,
    temperatures: usize,
    wavenumbers: usize,
    g_points: usize,
    filled: Vec<bool>,
}

impl CrossSectionGrid {
    /// Zero-filled grid with no cell marked as populated.
    pub fn new(pressures: usize, temperatures: usize, wavenumbers: usize, g_points: usize) -> Self {
        Self {
            data: vec![0.0; pressures * temperatures * wavenumbers * g_points],
            pressures,
            temperatures,
            wavenumbers,
            g_points,
            filled: vec![false; pressures * temperatures],
        }
    }

    /// `(pressures, temperatures, wavenumbers, g_points)`.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.pressures, self.temperatures, self.wavenumbers, self.g_points)
    }

    pub fn wavenumbers(&self) -> usize {
        self.wavenumbers
    }

    pub fn g_points(&self) -> usize {
        self.g_points
    }

    /// Values per (pressure, temperature) cell.
    pub fn slab_len(&self) -> usize {
        self.wavenumbers * self.g_points
    }

    fn cell_index(&self, p: usize, t: usize) -> usize {
        assert!(
            p < self.pressures && t < self.temperatures,
            "cell ({}, {}) outside {}x{} grid",
            p,
            t,
            self.pressures,
            self.temperatures
        );
        p * self.temperatures + t
    }

    /// The `[W][G]` slab of one cell.
    pub fn slab(&self, p: usize, t: usize) -> &[f64] {
        let start = self.cell_index(p, t) * self.slab_len();
        &self.data[start..start + self.slab_len()]
    }

    /// Mutable slab of one cell; marks the cell as populated.
    pub fn slab_mut(&mut self, p: usize, t: usize) -> &mut [f64] {
        let cell = self.cell_index(p, t);
        self.filled[cell] = true;
        let len = self.slab_len();
        let start = cell * len;
        &mut self.data[start..start + len]
    }

    /// Single value.
    pub fn get(&self, p: usize, t: usize, w: usize, g: usize) -> f64 {
        self.slab(p, t)[w * self.g_points + g]
    }

    /// Number of cells never written.
    pub fn missing_cells(&self) -> usize {
        self.filled.iter().filter(|f| !**f).count()
    }

    pub fn cell_count(&self) -> usize {
        self.filled.len()
    }

    /// Reverse every slab along the wavenumber axis, keeping g-point order.
    pub fn reverse_wavenumber_axis(&mut self) {
        let len = self.slab_len();
        if len == 0 {
            return;
        }
        let g_points = self.g_points;
        for slab in self.data.chunks_exact_mut(len) {
            slab.reverse();
            for row in slab.chunks_exact_mut(g_points) {
                row.reverse();
            }
        }
    }

    /// Divide every value by `divisor`.
    pub fn divide_by(&mut self, divisor: f64) {
        for value in &mut self.data {
            *value /= divisor;
        }
    }

    /// Flat row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
