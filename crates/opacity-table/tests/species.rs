//! Loading every configured species at once.

use opacity_common::FormulaWeights;
use opacity_table::{load_molecule, load_species, OpacityConfig, OpacityError, OpacityFormat};
use test_utils::{assert_approx_eq, ramp_spectrum, OpacityFixture};

fn fixture_with(molecules: &[&str]) -> OpacityFixture {
    let fixture = OpacityFixture::new();
    for folder in molecules {
        fixture.write_wavelengths(folder, &[1e-4, 2e-4, 3e-4]);
        for t in [300.0, 600.0] {
            for p in [0.01, 1.0] {
                fixture.write_line_by_line_sample(folder, t, p, &ramp_spectrum(3, t));
            }
        }
    }
    fixture
}

#[test]
fn test_load_species() {
    let fixture = fixture_with(&["H2O_main_iso", "CO_all_iso", "CH4"]);
    let mut config = OpacityConfig::new(fixture.root(), OpacityFormat::LineByLine);
    config.species = vec!["H2O".to_string(), "CO".to_string()];

    let tables = load_species(&config, &FormulaWeights::new()).unwrap();

    assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["CO", "H2O"]);
    for (name, table) in &tables {
        assert_eq!(table.molecule_name(), name);
        assert_eq!(table.pressure_grid(), &[1e3, 1e5]);
        assert_eq!(table.temperature_grid(), &[300.0, 600.0]);
    }
    assert!(tables["H2O"].source_path().ends_with("H2O_main_iso"));
}

#[test]
fn test_normalization_uses_molecular_weight() {
    let fixture = fixture_with(&["H2O", "CO"]);
    let mut config = OpacityConfig::new(fixture.root(), OpacityFormat::LineByLine);
    config.species = vec!["H2O".to_string(), "CO".to_string()];

    let weights = FormulaWeights::new()
        .with_override("H2O", 10.0)
        .with_override("CO", 20.0);
    let tables = load_species(&config, &weights).unwrap();

    let h2o = tables["H2O"].cross_section_at(1e5, 300.0);
    let co = tables["CO"].cross_section_at(1e5, 300.0);
    for (a, b) in h2o.iter().zip(&co) {
        assert_approx_eq!(b / a, 2.0, 1e-12);
    }
}

#[test]
fn test_missing_species_fails_whole_load() {
    let fixture = fixture_with(&["H2O"]);
    let mut config = OpacityConfig::new(fixture.root(), OpacityFormat::LineByLine);
    config.species = vec!["H2O".to_string(), "NH3".to_string()];

    let err = load_species(&config, &FormulaWeights::new()).unwrap_err();
    match err {
        OpacityError::DatasetNotFound { molecule, format } => {
            assert_eq!(molecule, "NH3");
            assert_eq!(format, OpacityFormat::LineByLine);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unknown_molecular_weight() {
    let fixture = fixture_with(&["Xx"]);
    let config = OpacityConfig::new(fixture.root(), OpacityFormat::LineByLine);

    let err = load_molecule(&config, &FormulaWeights::new(), "Xx").unwrap_err();
    assert!(matches!(err, OpacityError::Chemistry(_)), "{}", err);
}

#[test]
fn test_empty_species_list() {
    let fixture = fixture_with(&["H2O"]);
    let config = OpacityConfig::new(fixture.root(), OpacityFormat::LineByLine);
    let tables = load_species(&config, &FormulaWeights::new()).unwrap();
    assert!(tables.is_empty());
}
