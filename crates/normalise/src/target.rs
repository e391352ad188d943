//! Target nuclide parsing

// internal modules
use crate::element::{atomic_number, element_symbol};
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

// nom parser combinators
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{char, digit0};
use nom::combinator::{eof, opt};
use nom::sequence::preceded;
use nom::IResult;

/// Target nuclide of a reaction
///
/// The `FromStr` trait is implemented for the EXFOR target notation of
/// `<SYMBOL>-<MASS>` with an optional isomer suffix, e.g.
///
/// - Ground state `FE-56`, `U-235`
/// - First isomer `U-235-M`
/// - Numbered isomer `U-235-M2`
///
/// Element symbols are upper case and matched exactly against the 118 known
/// elements. Natural targets use a mass number of zero, e.g. `FE-0`.
///
/// ```rust
/// # use x4tools_normalise::{Target, IsomerState};
/// # use std::str::FromStr;
/// assert_eq!(
///     Target::from_str("U-235-M2").unwrap(),
///     Target {
///         z: 92,
///         a: 235,
///         state: IsomerState::Excited(2)
///     }
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Atomic number
    pub z: u8,
    /// Mass number (Z+N, total nucleons), zero for natural elements
    pub a: u16,
    /// Excited state status
    pub state: IsomerState,
}

/// Variants of excited states
///
/// A nuclide can either be in the ground state, or some numbered excited
/// state. An unnumbered `-M` suffix is taken as the first excited state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IsomerState {
    #[default]
    Ground,
    Excited(u32),
}

impl IsomerState {
    /// Numeric state, with 0 for the ground state
    ///
    /// ```rust
    /// # use x4tools_normalise::IsomerState;
    /// assert_eq!(IsomerState::Ground.level(), 0);
    /// assert_eq!(IsomerState::Excited(2).level(), 2);
    /// ```
    pub fn level(&self) -> u32 {
        match self {
            IsomerState::Ground => 0,
            IsomerState::Excited(n) => *n,
        }
    }
}

impl From<u32> for IsomerState {
    fn from(level: u32) -> Self {
        match level {
            0 => IsomerState::Ground,
            n => IsomerState::Excited(n),
        }
    }
}

impl Target {
    /// Element symbol for the target, if the atomic number is valid
    pub fn symbol(&self) -> Option<&'static str> {
        element_symbol(self.z)
    }
}

impl std::str::FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (symbol, a, isomer)) =
            target_parts(s).map_err(|_| Error::InvalidTarget(s.to_string()))?;

        let z = atomic_number(symbol).ok_or_else(|| Error::UnknownElement(symbol.to_string()))?;

        let state = match isomer {
            None => IsomerState::Ground,
            Some("") => IsomerState::Excited(1),
            Some(digits) => digits
                .parse::<u32>()
                .map(IsomerState::from)
                .map_err(|_| Error::InvalidTarget(s.to_string()))?,
        };

        Ok(Target { z, a, state })
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.symbol().unwrap_or("?"), self.a)?;
        match self.state {
            IsomerState::Ground => Ok(()),
            IsomerState::Excited(1) => write!(f, "-M"),
            IsomerState::Excited(n) => write!(f, "-M{n}"),
        }
    }
}

/// Parse a raw target code into `(atomic number, mass number, isomer state)`
///
/// Convenience wrapper around `Target::from_str()` for callers that only care
/// whether the target is usable.
///
/// ```rust
/// # use x4tools_normalise::parse_target;
/// assert_eq!(parse_target("FE-56"), Some((26, 56, 0)));
/// assert_eq!(parse_target("U-235-M"), Some((92, 235, 1)));
/// assert_eq!(parse_target("HF-178-M300"), Some((72, 178, 300)));
/// assert_eq!(parse_target("FE56"), None);
/// ```
pub fn parse_target(s: &str) -> Option<(u8, u16, u32)> {
    let target: Target = s.parse().ok()?;
    Some((target.z, target.a, target.state.level()))
}

/// Split into symbol, mass number, and the digits of any isomer suffix
fn target_parts(i: &str) -> IResult<&str, (&str, u16, Option<&str>)> {
    let (i, symbol) = take_while_m_n(1, 3, |c: char| c.is_ascii_uppercase())(i)?;
    let (i, _) = char('-')(i)?;
    let (i, mass) = nom::character::complete::u16(i)?;
    let (i, isomer) = opt(preceded(tag("-M"), digit0))(i)?;
    let (i, _) = eof(i)?;
    Ok((i, (symbol, mass, isomer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("FE-56", 26, 56, 0)]
    #[case("U-235-M", 92, 235, 1)]
    #[case("U-235-M2", 92, 235, 2)]
    #[case("U-235-M0", 92, 235, 0)]
    #[case("H-1", 1, 1, 0)]
    #[case("FE-0", 26, 0, 0)]
    #[case("OG-294", 118, 294, 0)]
    #[case("FE-56-M999", 26, 56, 999)]
    #[case("FE-56-M256", 26, 56, 256)]
    fn valid_targets(#[case] raw: &str, #[case] z: u8, #[case] a: u16, #[case] state: u32) {
        assert_eq!(parse_target(raw), Some((z, a, state)));
    }

    #[rstest]
    #[case("XX-10")]
    #[case("FE56")]
    #[case("Fe-56")]
    #[case("FE-")]
    #[case("FE-56-G")]
    #[case("FE-56-M1X")]
    #[case("ABCD-1")]
    #[case("")]
    #[case("FE-56-M99999999999")]
    fn invalid_targets(#[case] raw: &str) {
        assert_eq!(parse_target(raw), None);
    }

    #[test]
    fn failure_reasons() {
        assert_eq!(
            Target::from_str("XX-10"),
            Err(Error::UnknownElement("XX".to_string()))
        );
        assert_eq!(
            Target::from_str("FE56"),
            Err(Error::InvalidTarget("FE56".to_string()))
        );
    }

    #[test]
    fn display() {
        assert_eq!(Target::from_str("FE-56").unwrap().to_string(), "FE-56");
        assert_eq!(Target::from_str("U-235-M").unwrap().to_string(), "U-235-M");
        assert_eq!(Target::from_str("U-235-M2").unwrap().to_string(), "U-235-M2");
    }
}
