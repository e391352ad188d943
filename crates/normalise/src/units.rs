//! Energy and temperature unit conversions

/// Boltzmann constant in eV/K
pub const BOLTZMANN_EV: f64 = 8.617333262e-5;

/// Boltzmann constant in keV/K
pub const BOLTZMANN_KEV: f64 = 8.617333262e-8;

/// Energy units recognised in EXFOR headings
///
/// Temperatures given in Kelvin are treated as an energy through the
/// Boltzmann constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyUnit {
    NanoEv,
    MicroEv,
    MilliEv,
    Ev,
    KeV,
    MeV,
    GeV,
    Kelvin,
}

impl EnergyUnit {
    /// Recognise a unit string, ignoring case and surrounding whitespace
    ///
    /// ```rust
    /// # use x4tools_normalise::EnergyUnit;
    /// assert_eq!(EnergyUnit::parse(" mev "), Some(EnergyUnit::MeV));
    /// assert_eq!(EnergyUnit::parse("B"), None);
    /// ```
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.trim().to_uppercase().as_str() {
            "NEV" => Some(EnergyUnit::NanoEv),
            "UEV" => Some(EnergyUnit::MicroEv),
            "MILLI-EV" => Some(EnergyUnit::MilliEv),
            "EV" => Some(EnergyUnit::Ev),
            "KEV" => Some(EnergyUnit::KeV),
            "MEV" => Some(EnergyUnit::MeV),
            "GEV" => Some(EnergyUnit::GeV),
            "K" => Some(EnergyUnit::Kelvin),
            _ => None,
        }
    }

    /// Multiplier to convert a value in this unit to eV
    pub fn ev_factor(&self) -> f64 {
        match self {
            EnergyUnit::NanoEv => 1e-9,
            EnergyUnit::MicroEv => 1e-6,
            EnergyUnit::MilliEv => 1e-3,
            EnergyUnit::Ev => 1.0,
            EnergyUnit::KeV => 1e3,
            EnergyUnit::MeV => 1e6,
            EnergyUnit::GeV => 1e9,
            EnergyUnit::Kelvin => BOLTZMANN_EV,
        }
    }
}

/// Convert an energy to eV
///
/// Values in an unrecognised unit are passed through unchanged on the
/// assumption that they are already in eV. A missing value stays missing.
///
/// ```rust
/// # use x4tools_normalise::energy_to_ev;
/// assert_eq!(energy_to_ev(Some(1000.0), "KEV"), Some(1.0e6));
/// assert_eq!(energy_to_ev(Some(1.0), "K"), Some(8.617333262e-5));
/// assert_eq!(energy_to_ev(Some(5.0), "XYZ"), Some(5.0));
/// assert_eq!(energy_to_ev(None, "MEV"), None);
/// ```
pub fn energy_to_ev(value: Option<f64>, unit: &str) -> Option<f64> {
    let value = value?;
    match EnergyUnit::parse(unit) {
        Some(unit) => Some(value * unit.ev_factor()),
        None => Some(value),
    }
}

/// Convert a temperature (kT) to keV
///
/// Only `EV`, `KEV`, `MEV`, `GEV` and `K` are converted, Kelvin through the
/// Boltzmann constant in keV/K. Anything else, including the sub-eV units,
/// is passed through unchanged.
///
/// ```rust
/// # use x4tools_normalise::kt_to_kev;
/// assert_eq!(kt_to_kev(Some(30.0), "KEV"), Some(30.0));
/// assert_eq!(kt_to_kev(Some(30000.0), "EV"), Some(30.0));
/// assert_eq!(kt_to_kev(Some(1.0), "K"), Some(8.617333262e-8));
/// assert_eq!(kt_to_kev(Some(25.3), "MILLI-EV"), Some(25.3));
/// assert_eq!(kt_to_kev(Some(5.0), "XYZ"), Some(5.0));
/// ```
pub fn kt_to_kev(value: Option<f64>, unit: &str) -> Option<f64> {
    let value = value?;
    let converted = match EnergyUnit::parse(unit) {
        Some(EnergyUnit::KeV) => value,
        Some(EnergyUnit::Ev) => value / 1e3,
        Some(EnergyUnit::MeV) => value * 1e3,
        Some(EnergyUnit::GeV) => value * 1e6,
        Some(EnergyUnit::Kelvin) => value * BOLTZMANN_KEV,
        _ => value,
    };
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1000.0, "KEV", 1.0e6)]
    #[case(1.0, "MEV", 1.0e6)]
    #[case(2.0, "GEV", 2.0e9)]
    #[case(2.5, "EV", 2.5)]
    #[case(1.0, "K", 8.617333262e-5)]
    #[case(5.0, "XYZ", 5.0)]
    #[case(5.0, "", 5.0)]
    #[case(3.0, "kev", 3.0e3)]
    fn energies(#[case] value: f64, #[case] unit: &str, #[case] expected: f64) {
        assert_eq!(energy_to_ev(Some(value), unit), Some(expected));
    }

    #[test]
    fn sub_ev_energies() {
        let close = |a: Option<f64>, b: f64| (a.unwrap() - b).abs() <= b * 1e-12;
        assert!(close(energy_to_ev(Some(25.3), "MILLI-EV"), 0.0253));
        assert!(close(energy_to_ev(Some(4.0), "UEV"), 4.0e-6));
        assert!(close(energy_to_ev(Some(7.0), "NEV"), 7.0e-9));
    }

    #[rstest]
    #[case(30.0, "KEV", 30.0)]
    #[case(30000.0, "EV", 30.0)]
    #[case(0.03, "MEV", 30.0)]
    #[case(1.0, "K", 8.617333262e-8)]
    #[case(2.0, "gev", 2.0e6)]
    fn temperatures(#[case] value: f64, #[case] unit: &str, #[case] expected: f64) {
        let kev = kt_to_kev(Some(value), unit).unwrap();
        assert!((kev - expected).abs() <= expected * 1e-12);
    }

    #[rstest]
    #[case(25.3, "MILLI-EV")]
    #[case(4.0, "UEV")]
    #[case(7.0, "NEV")]
    #[case(5.0, "XYZ")]
    #[case(5.0, "")]
    fn temperatures_passed_through(#[case] value: f64, #[case] unit: &str) {
        assert_eq!(kt_to_kev(Some(value), unit), Some(value));
    }

    #[test]
    fn missing_values() {
        assert_eq!(energy_to_ev(None, "EV"), None);
        assert_eq!(kt_to_kev(None, "KEV"), None);
    }
}
