//! Codec configuration types

use sika_core::log::warn;

use crate::errors::CodecErrors;
use crate::misc::broadcast;

/// Block emission order across components.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CodingMode {
    /// Components are serialized one after the other, each in raster
    /// block order
    NonInterleaved,
    /// Blocks of all components are woven into a single MCU sequence
    Interleaved
}

/// Per-component sampling configuration.
///
/// The packed form carries a `4XY` code such as `420`; the explicit form
/// lists `(sx, sy)` pairs which broadcast over components, repeating the
/// last pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SamplingSpec {
    /// Compact code, e.g. `444` or `420`; chroma is implicitly `(1, 1)`
    Packed(u16),
    /// Explicit `(sx, sy)` pairs in component order
    PerComponent(Vec<(u8, u8)>)
}

impl SamplingSpec {
    /// Parse the colon form, e.g. `"4:2:0"`.
    ///
    /// The colons are dropped by keeping every other character, so the
    /// code collapses to its three digits.
    pub fn from_code(code: &str) -> Result<SamplingSpec, CodecErrors> {
        let digits: String = code.chars().step_by(2).collect();

        let packed = digits
            .parse::<u16>()
            .map_err(|_| CodecErrors::InvalidShape(format!("invalid sampling code {code:?}")))?;

        Ok(SamplingSpec::Packed(packed))
    }

    /// Normalize to one `(sx, sy)` pair per component.
    pub(crate) fn normalize(&self, components: usize) -> Result<Vec<(u8, u8)>, CodecErrors> {
        let factors = match self {
            SamplingSpec::Packed(code) => {
                let luma = match code {
                    444 => (1, 1),
                    440 => (1, 2),
                    420 => (2, 2),
                    422 => (2, 1),
                    410 => (4, 2),
                    411 => (4, 1),
                    _ => {
                        warn!("Unknown sampling code {}, falling back to 4:2:0", code);
                        (2, 2)
                    }
                };

                broadcast(&[luma, (1, 1)], components)
            }
            SamplingSpec::PerComponent(pairs) => {
                if pairs.is_empty() {
                    return Err(CodecErrors::InvalidShape(
                        "empty sampling factor list".to_string()
                    ));
                }
                broadcast(pairs, components)
            }
        };

        for &(sx, sy) in &factors {
            if !matches!(sx, 1 | 2 | 4) || !matches!(sy, 1 | 2 | 4) {
                return Err(CodecErrors::InvalidShape(format!(
                    "sampling factor ({sx}, {sy}) outside {{1, 2, 4}}"
                )));
            }
        }
        Ok(factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_codes_map_to_luma_factors() {
        for (code, luma) in [
            (444, (1, 1)),
            (440, (1, 2)),
            (420, (2, 2)),
            (422, (2, 1)),
            (410, (4, 2)),
            (411, (4, 1))
        ] {
            let factors = SamplingSpec::Packed(code).normalize(3).unwrap();
            assert_eq!(factors, vec![luma, (1, 1), (1, 1)]);
        }
    }

    #[test]
    fn unknown_packed_code_falls_back() {
        let factors = SamplingSpec::Packed(433).normalize(3).unwrap();
        assert_eq!(factors, vec![(2, 2), (1, 1), (1, 1)]);
    }

    #[test]
    fn colon_form_collapses() {
        assert_eq!(
            SamplingSpec::from_code("4:2:0").unwrap(),
            SamplingSpec::Packed(420)
        );
        assert!(SamplingSpec::from_code("a:b:c").is_err());
    }

    #[test]
    fn explicit_pairs_broadcast() {
        let spec = SamplingSpec::PerComponent(vec![(2, 1)]);
        assert_eq!(spec.normalize(3).unwrap(), vec![(2, 1), (2, 1), (2, 1)]);
    }

    #[test]
    fn rejects_factors_outside_the_profile() {
        let spec = SamplingSpec::PerComponent(vec![(3, 1)]);
        assert!(spec.normalize(3).is_err());

        let spec = SamplingSpec::PerComponent(vec![]);
        assert!(spec.normalize(3).is_err());
    }
}
