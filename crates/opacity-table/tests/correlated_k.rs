//! Correlated-k loading against temporary opacity trees.

use opacity_common::{frequency_to_wavenumber, FormulaWeights, AVOGADRO};
use opacity_table::{
    quadrature_weights, MoleculeCatalog, OpacityConfig, OpacityError, OpacityFormat,
    OpacityTable, G_POINTS,
};
use test_utils::{assert_slice_rel_eq, descending_frequencies, g_point_block, OpacityFixture};

const CO_WEIGHT: f64 = 28.0;

fn weights() -> FormulaWeights {
    FormulaWeights::new()
        .with_override("CO", CO_WEIGHT)
        .with_override("H2O", 18.0)
}

fn load(fixture: &OpacityFixture, molecule: &str) -> Result<OpacityTable, OpacityError> {
    let config = OpacityConfig::new(fixture.root(), OpacityFormat::CorrelatedK);
    let catalog = MoleculeCatalog::discover(&config)?;
    let entry = catalog.resolve(molecule)?;
    config.method.load(entry, &config, &weights())
}

/// Three bins, one (P, T) sample whose native rows are `100 * row + g`.
fn single_sample_fixture(folder: &str) -> OpacityFixture {
    let fixture = OpacityFixture::new();
    fixture.write_kappa_info(folder, &descending_frequencies(3, 3e14, 1e14));
    fixture.write_corr_k_sample(folder, 1000.0, 1.0, &g_point_block(3, G_POINTS, 0.0));
    fixture
}

#[test]
fn test_wavenumbers_ascend_from_header() {
    let fixture = single_sample_fixture("CO_all_iso");
    let table = load(&fixture, "CO").unwrap();

    let expected: Vec<f64> = [1e14, 2e14, 3e14]
        .iter()
        .map(|f| frequency_to_wavenumber(*f))
        .collect();
    assert_slice_rel_eq!(table.wavenumber_grid(), expected, 1e-12);
    assert_eq!(table.g_points(), G_POINTS);
}

#[test]
fn test_bins_reversed_and_g_points_kept() {
    let fixture = single_sample_fixture("CO_all_iso");
    let table = load(&fixture, "CO").unwrap();

    let n = AVOGADRO / CO_WEIGHT;
    let sample = table.sample(1e5, 1000.0);
    assert_eq!(sample.values.len(), 3 * G_POINTS);

    // Lowest wavenumber bin comes from the last native row.
    let expected_first: Vec<f64> = (0..G_POINTS).map(|g| (200 + g) as f64 / n).collect();
    let expected_last: Vec<f64> = (0..G_POINTS).map(|g| g as f64 / n).collect();
    assert_slice_rel_eq!(sample.bin(0), expected_first, 1e-12);
    assert_slice_rel_eq!(sample.bin(2), expected_last, 1e-12);
}

#[test]
fn test_pressure_interpolation_per_g_point() {
    let fixture = OpacityFixture::new();
    fixture.write_kappa_info("CO", &descending_frequencies(2, 2e14, 1e14));
    fixture.write_corr_k_sample("CO", 500.0, 0.1, &g_point_block(2, G_POINTS, 0.0));
    fixture.write_corr_k_sample("CO", 500.0, 10.0, &g_point_block(2, G_POINTS, 1000.0));

    let table = load(&fixture, "CO").unwrap();
    let n = AVOGADRO / CO_WEIGHT;

    // Halfway between 1e4 and 1e6 Pa in linear pressure.
    let values = table.cross_section_at(5.05e5, 500.0);
    let expected: Vec<f64> = g_point_block(2, G_POINTS, 500.0)
        .chunks(G_POINTS)
        .rev()
        .flatten()
        .map(|v| v / n)
        .collect();
    assert_slice_rel_eq!(values, expected, 1e-12);
}

#[test]
fn test_quadrature_shared_across_molecules() {
    let fixture = single_sample_fixture("CO");
    fixture.write_kappa_info("H2O_main_iso", &descending_frequencies(3, 3e14, 1e14));
    fixture.write_corr_k_sample("H2O_main_iso", 1000.0, 1.0, &g_point_block(3, G_POINTS, 0.0));

    let co = load(&fixture, "CO").unwrap();
    let h2o = load(&fixture, "H2O").unwrap();

    assert_eq!(co.quadrature_weights(), Some(&quadrature_weights()));
    assert_eq!(co.quadrature_weights(), h2o.quadrature_weights());
}

#[test]
fn test_corrupt_record_stream() {
    let fixture = OpacityFixture::new();
    fixture.write_kappa_info("CO", &descending_frequencies(1, 1e14, 0.0));
    let dir = fixture.corr_k_dir("CO");
    fixture.write_raw(&dir, "sigma_CO_1000K_1bar.dat", &[0u8; 10]);

    let err = load(&fixture, "CO").unwrap_err();
    assert!(matches!(err, OpacityError::CorruptRecordStream { .. }), "{}", err);
}

#[test]
fn test_partial_record_is_corrupt() {
    let fixture = OpacityFixture::new();
    fixture.write_kappa_info("CO", &descending_frequencies(1, 1e14, 0.0));
    let dir = fixture.corr_k_dir("CO");
    // Whole words, but not a whole number of 4-word records.
    fixture.write_raw(&dir, "sigma_CO_1000K_1bar.dat", &[0u8; 24]);

    let err = load(&fixture, "CO").unwrap_err();
    assert!(matches!(err, OpacityError::CorruptRecordStream { .. }), "{}", err);
}

#[test]
fn test_bin_count_must_match_header() {
    let fixture = OpacityFixture::new();
    fixture.write_kappa_info("CO", &descending_frequencies(3, 3e14, 1e14));
    fixture.write_corr_k_sample("CO", 1000.0, 1.0, &g_point_block(2, G_POINTS, 0.0));

    let err = load(&fixture, "CO").unwrap_err();
    assert!(matches!(err, OpacityError::FormatMismatch { .. }), "{}", err);
}

#[test]
fn test_values_not_divisible_into_g_point_rows() {
    let fixture = OpacityFixture::new();
    fixture.write_kappa_info("CO", &descending_frequencies(1, 1e14, 0.0));
    fixture.write_corr_k_sample("CO", 1000.0, 1.0, &[1.0; G_POINTS + 1]);

    let err = load(&fixture, "CO").unwrap_err();
    assert!(matches!(err, OpacityError::FormatMismatch { .. }), "{}", err);
}

#[test]
fn test_missing_header_file() {
    let fixture = OpacityFixture::new();
    fixture.write_corr_k_sample("CO", 1000.0, 1.0, &g_point_block(1, G_POINTS, 0.0));

    let err = load(&fixture, "CO").unwrap_err();
    assert!(matches!(err, OpacityError::Io { .. }), "{}", err);
}

#[test]
fn test_formats_are_discovered_separately() {
    let fixture = single_sample_fixture("CO");
    let config = OpacityConfig::new(fixture.root(), OpacityFormat::LineByLine);
    let catalog = MoleculeCatalog::discover(&config).unwrap();
    assert!(catalog.is_empty());
    assert!(matches!(
        catalog.resolve("CO"),
        Err(OpacityError::DatasetNotFound {
            format: OpacityFormat::LineByLine,
            ..
        })
    ));
}
