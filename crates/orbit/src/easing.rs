use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

const ELASTIC_PERIOD: f64 = 0.3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    #[strum(serialize = "linear")]
    Linear,
    #[strum(serialize = "in_cubic", serialize = "cubic_in")]
    InCubic,
    #[strum(serialize = "out_cubic", serialize = "cubic_out")]
    OutCubic,
    #[strum(serialize = "in_out_cubic", serialize = "cubic_in_out")]
    InOutCubic,
    #[strum(serialize = "in_quad", serialize = "quad_in")]
    InQuad,
    #[strum(serialize = "out_quad", serialize = "quad_out")]
    OutQuad,
    #[strum(serialize = "out_elastic", serialize = "elastic_out")]
    OutElastic,
}

impl Easing {
    /// Maps linear progress `t` in [0, 1] to eased progress. Elastic output
    /// overshoots the unit interval on purpose.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InCubic => t * t * t,
            Self::OutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = ELASTIC_PERIOD / 4.0;
                2f64.powf(-10.0 * t) * ((t - s) * 2.0 * PI / ELASTIC_PERIOD).sin() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_endpoints() {
        for easing in Easing::iter() {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing} at 1");
        }
    }

    #[test]
    fn test_shapes() {
        assert!(Easing::InCubic.apply(0.5) < 0.5);
        assert!(Easing::OutCubic.apply(0.5) > 0.5);
        assert!((Easing::InOutCubic.apply(0.5) - 0.5).abs() < 1e-9);
        assert!(Easing::OutQuad.apply(0.3) > Easing::InQuad.apply(0.3));
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::OutElastic.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"linear\"", Easing::Linear),
            ("\"OUT_CUBIC\"", Easing::OutCubic),
            ("\"cubic_in\"", Easing::InCubic),
            ("\"elastic_out\"", Easing::OutElastic),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
