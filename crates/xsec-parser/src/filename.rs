//! Sample file naming: `sigma_<label>_<temperature>K_<pressure>bar.<ext>`.

use crate::error::{ParseError, ParseResult};

const PREFIX: &str = "sigma_";
const TEMPERATURE_SUFFIX: &str = "K";
const PRESSURE_SUFFIX: &str = "bar";

/// Fields encoded in a sample file name.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFilename {
    pub label: String,
    /// Temperature in K.
    pub temperature: f64,
    /// Pressure in bar, as written in the name.
    pub pressure_bar: f64,
}

impl SampleFilename {
    /// Parse a file name (no directory part) with the given extension.
    ///
    /// The last two `_` fields are the temperature and pressure; everything
    /// between the prefix and them is the label.
    pub fn parse(name: &str, extension: &str) -> ParseResult<Self> {
        let stem = name
            .strip_suffix(extension)
            .and_then(|s| s.strip_suffix('.'))
            .ok_or_else(|| {
                ParseError::invalid_filename(name, format!("missing .{} extension", extension))
            })?;

        let body = stem
            .strip_prefix(PREFIX)
            .ok_or_else(|| ParseError::invalid_filename(name, "missing sigma_ prefix"))?;

        let mut fields = body.rsplitn(3, '_');
        let (pressure, temperature, label) = match (fields.next(), fields.next(), fields.next()) {
            (Some(p), Some(t), Some(l)) if !l.is_empty() => (p, t, l),
            _ => {
                return Err(ParseError::invalid_filename(
                    name,
                    "expected <label>_<T>K_<P>bar",
                ))
            }
        };

        let temperature = parse_field(name, temperature, TEMPERATURE_SUFFIX)?;
        let pressure_bar = parse_field(name, pressure, PRESSURE_SUFFIX)?;

        Ok(Self {
            label: label.to_string(),
            temperature,
            pressure_bar,
        })
    }

    /// Render the file name for these fields.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}{}_{}{}_{}{}.{}",
            PREFIX,
            self.label,
            self.temperature,
            TEMPERATURE_SUFFIX,
            self.pressure_bar,
            PRESSURE_SUFFIX,
            extension
        )
    }
}

fn parse_field(name: &str, field: &str, suffix: &str) -> ParseResult<f64> {
    let number = field.strip_suffix(suffix).ok_or_else(|| {
        ParseError::invalid_filename(name, format!("field '{}' lacks '{}' suffix", field, suffix))
    })?;

    let value = number
        .parse::<f64>()
        .map_err(|e| ParseError::invalid_filename(name, format!("'{}': {}", number, e)))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ParseError::invalid_filename(
            name,
            format!("'{}' is not a positive finite value", number),
        ));
    }
    Ok(value)
}
