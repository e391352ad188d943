//! Measured quantity codes

// internal modules
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// Physical quantities supported for normalisation
///
/// | Code   | Variant                | Description                                 |
/// | ------ | ---------------------- | ------------------------------------------- |
/// | `SIG`  | [Quantity::CrossSection] | Cross section                             |
/// | `DA`   | [Quantity::Angular]    | Angular distribution                        |
/// | `DE`   | [Quantity::Spectrum]   | Energy spectrum of outgoing particles       |
/// | `FY`   | [Quantity::FissionYield] | Fission product yield                     |
/// | `MACS` | [Quantity::Maxwellian] | Maxwellian-averaged capture cross section   |
///
/// Maxwellian-averaged data are given as a function of temperature rather
/// than incident energy, see [Quantity::is_capture_rate()].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    CrossSection,
    Angular,
    Spectrum,
    FissionYield,
    Maxwellian,
}

impl Quantity {
    /// Every supported quantity code
    pub const EXFOR_CODES: [&'static str; 5] = ["SIG", "DA", "DE", "FY", "MACS"];

    /// EXFOR quantity code
    pub fn code(&self) -> &'static str {
        match self {
            Quantity::CrossSection => "SIG",
            Quantity::Angular => "DA",
            Quantity::Spectrum => "DE",
            Quantity::FissionYield => "FY",
            Quantity::Maxwellian => "MACS",
        }
    }

    /// True for quantities tabulated against temperature, not energy
    ///
    /// ```rust
    /// # use x4tools_normalise::Quantity;
    /// assert!(Quantity::Maxwellian.is_capture_rate());
    /// assert!(!Quantity::CrossSection.is_capture_rate());
    /// ```
    pub fn is_capture_rate(&self) -> bool {
        matches!(self, Quantity::Maxwellian)
    }
}

impl std::str::FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SIG" => Ok(Quantity::CrossSection),
            "DA" => Ok(Quantity::Angular),
            "DE" => Ok(Quantity::Spectrum),
            "FY" => Ok(Quantity::FissionYield),
            "MACS" => Ok(Quantity::Maxwellian),
            _ => Err(Error::UnsupportedQuantity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("SIG", Quantity::CrossSection)]
    #[case("DA", Quantity::Angular)]
    #[case("DE", Quantity::Spectrum)]
    #[case("FY", Quantity::FissionYield)]
    #[case("MACS", Quantity::Maxwellian)]
    fn codes(#[case] code: &str, #[case] quantity: Quantity) {
        assert_eq!(Quantity::from_str(code), Ok(quantity));
        assert_eq!(quantity.code(), code);
    }

    #[test]
    fn unsupported() {
        assert_eq!(
            Quantity::from_str("POL/DA"),
            Err(Error::UnsupportedQuantity("POL/DA".to_string()))
        );
        assert!(Quantity::from_str("sig").is_err());
    }
}
