//! Fixed g-point quadrature of the correlated-k tables.
//!
//! The 16 g-points are two 8-point Gauss–Legendre sets: the first covers
//! g ∈ [0, 0.9] and the second g ∈ [0.9, 1].

/// g-points per wavenumber bin.
pub const G_POINTS: usize = 16;

/// 8-point Gauss–Legendre weights on [-1, 1], ordered by ascending node.
pub const GAUSS_LEGENDRE_8_WEIGHTS: [f64; 8] = [
    0.101_228_536_290_376_26,
    0.222_381_034_453_374_47,
    0.313_706_645_877_887_29,
    0.362_683_783_378_361_98,
    0.362_683_783_378_361_98,
    0.313_706_645_877_887_29,
    0.222_381_034_453_374_47,
    0.101_228_536_290_376_26,
];

/// Matching 8-point Gauss–Legendre nodes on [-1, 1].
pub const GAUSS_LEGENDRE_8_NODES: [f64; 8] = [
    -0.960_289_856_497_536_3,
    -0.796_666_477_413_626_7,
    -0.525_532_409_916_329_0,
    -0.183_434_642_495_649_8,
    0.183_434_642_495_649_8,
    0.525_532_409_916_329_0,
    0.796_666_477_413_626_7,
    0.960_289_856_497_536_3,
];

/// Scale divisor applied to the first set.
const LOWER_SET_DIVISOR: f64 = 2.0 / 0.9;

/// Scale divisor applied to the second set.
const UPPER_SET_DIVISOR: f64 = 20.0;

/// The 16 g-point weights shared by every correlated-k molecule.
pub fn quadrature_weights() -> [f64; G_POINTS] {
    let mut weights = [0.0; G_POINTS];
    for (i, w) in GAUSS_LEGENDRE_8_WEIGHTS.iter().enumerate() {
        weights[i] = w / LOWER_SET_DIVISOR;
        weights[i + 8] = w / UPPER_SET_DIVISOR;
    }
    weights
}
