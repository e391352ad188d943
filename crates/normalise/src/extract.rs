//! Column selection and point extraction for simplified datasets

// internal modules
use crate::numeric::to_number;
use crate::quantity::Quantity;
use crate::units::{energy_to_ev, kt_to_kev};

// external crates
use log::trace;
use serde::{Deserialize, Serialize};
use x4tools_x4::{Dataset, Scalar};

// Candidate lists are in order of preference, the first label found wins

/// Headings for the measured value
const VALUE_LABELS: [&str; 1] = ["DATA"];

/// Headings for the incident energy
const ENERGY_LABELS: [&str; 6] = ["EN", "ENERGY", "EN-LAB", "EN-CM", "EN-RSL", "E"];

/// Headings for the temperature of Maxwellian-averaged data
const TEMPERATURE_LABELS: [&str; 3] = ["KT", "KT-K", "K-T"];

/// Headings never taken as the measured value when there is no `DATA` column
const INDEPENDENT_LABELS: [&str; 7] = ["EN", "ENERGY", "EN-LAB", "EN-CM", "EN-RSL", "KT", "KT-K"];

/// Headings for a combined symmetric uncertainty
const ERROR_LABELS: [&str; 5] = ["DATA-ERR", "D(DATA)", "ERR", "ERR-T", "STAT-W G"];

/// Headings for asymmetric uncertainties
const ERROR_PLUS_LABEL: &str = "+DATA-ERR";
const ERROR_MINUS_LABEL: &str = "-DATA-ERR";

/// A single normalised data point
///
/// Energies are always in eV and temperatures always in keV. Only one of the
/// two is ever set, depending on the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Position of the source row in the dataset
    pub index: usize,
    /// Incident energy (eV)
    pub energy_ev: Option<f64>,
    /// Temperature (keV)
    pub kt_kev: Option<f64>,
    /// Measured value in the units of the dataset
    pub value: f64,
    /// Absolute uncertainty on the value
    pub uncertainty: Option<f64>,
}

/// Which columns of a dataset hold which roles
///
/// Resolved from the column headings alone. See [ColumnLayout::resolve()] for
/// the selection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Measured value
    pub value: usize,
    /// Incident energy
    pub energy: Option<usize>,
    /// Temperature
    pub temperature: Option<usize>,
    /// Combined symmetric uncertainty
    pub error: Option<usize>,
    /// Separate `(plus, minus)` uncertainties
    pub error_pair: Option<(usize, usize)>,
}

impl ColumnLayout {
    /// Pick out the columns of interest from upper case headings
    ///
    /// Each role takes the first heading found from an ordered list of
    /// candidates:
    ///
    /// | Role        | Candidates (in order of preference)                     |
    /// | ----------- | ------------------------------------------------------- |
    /// | value       | `DATA`, else the first column that is not an uncertainty or independent variable |
    /// | energy      | `EN`, `ENERGY`, `EN-LAB`, `EN-CM`, `EN-RSL`, `E`        |
    /// | temperature | `KT`, `KT-K`, `K-T`                                     |
    /// | uncertainty | `DATA-ERR`, `D(DATA)`, `ERR`, `ERR-T`, `STAT-W G`       |
    /// | +/- pair    | `+DATA-ERR` and `-DATA-ERR`                              |
    ///
    /// Returns `None` if no column can hold the measured value.
    ///
    /// ```rust
    /// # use x4tools_normalise::ColumnLayout;
    /// let labels = ["EN", "DATA", "DATA-ERR"].map(String::from);
    /// let layout = ColumnLayout::resolve(&labels).unwrap();
    ///
    /// assert_eq!(layout.value, 1);
    /// assert_eq!(layout.energy, Some(0));
    /// assert_eq!(layout.error, Some(2));
    /// ```
    pub fn resolve(labels: &[String]) -> Option<Self> {
        let value = find_index(labels, &VALUE_LABELS).or_else(|| {
            labels
                .iter()
                .position(|label| !is_error_label(label) && !INDEPENDENT_LABELS.contains(&label.as_str()))
        })?;

        let error_pair = match (
            find_index(labels, &[ERROR_PLUS_LABEL]),
            find_index(labels, &[ERROR_MINUS_LABEL]),
        ) {
            (Some(plus), Some(minus)) => Some((plus, minus)),
            _ => None,
        };

        Some(Self {
            value,
            energy: find_index(labels, &ENERGY_LABELS),
            temperature: find_index(labels, &TEMPERATURE_LABELS),
            error: find_index(labels, &ERROR_LABELS),
            error_pair,
        })
    }

    /// Absolute uncertainty for a row
    ///
    /// A combined uncertainty column always takes priority when it exists in
    /// the row, even if its value is missing. Otherwise the magnitudes of the
    /// plus and minus columns are averaged.
    fn uncertainty(&self, row: &[Scalar]) -> Option<f64> {
        if let Some(cell) = self.error.and_then(|i| row.get(i)) {
            return to_number(cell).map(f64::abs);
        }

        let (plus, minus) = self.error_pair?;
        let plus = to_number(row.get(plus)?)?;
        let minus = to_number(row.get(minus)?)?;
        Some((plus.abs() + minus.abs()) / 2.0)
    }
}

/// Extract normalised points from a dataset
///
/// Only the first `max_points` rows are considered. Rows without a usable
/// measured value are skipped, so point indices may have gaps but always
/// increase.
///
/// For [Quantity::Maxwellian] the temperature is extracted (in keV) and the
/// energy is never set. For every other quantity the energy is extracted (in
/// eV) and the temperature is never set.
///
/// A dataset with no column that can hold the measured value produces no
/// points.
///
/// ```rust
/// # use x4tools_normalise::{extract_points, Quantity};
/// # use x4tools_x4::{Dataset, Scalar};
/// let dataset = Dataset::new(
///     vec!["EN".into(), "DATA".into(), "DATA-ERR".into()],
///     vec!["MEV".into(), "B".into(), "B".into()],
///     vec![vec![Scalar::from(1.0), Scalar::from(2.5), Scalar::from(0.1)]],
/// );
///
/// let points = extract_points(&dataset, Quantity::CrossSection, 5000);
/// assert_eq!(points[0].energy_ev, Some(1.0e6));
/// assert_eq!(points[0].value, 2.5);
/// assert_eq!(points[0].uncertainty, Some(0.1));
/// ```
pub fn extract_points(dataset: &Dataset, quantity: Quantity, max_points: usize) -> Vec<Point> {
    let labels: Vec<String> = dataset.labels.iter().map(|l| l.to_uppercase()).collect();
    let units: Vec<String> = dataset.units.iter().map(|u| u.to_uppercase()).collect();

    let Some(layout) = ColumnLayout::resolve(&labels) else {
        trace!("No value column in {labels:?}");
        return Vec::new();
    };

    let unit = |i: usize| units.get(i).map(String::as_str).unwrap_or_default();

    dataset
        .data
        .iter()
        .take(max_points)
        .enumerate()
        .filter_map(|(index, row)| {
            let value = row.get(layout.value).and_then(to_number)?;

            let (energy_ev, kt_kev) = if quantity.is_capture_rate() {
                let kt = layout
                    .temperature
                    .and_then(|i| Some(kt_to_kev(to_number(row.get(i)?), unit(i))))
                    .flatten();
                (None, kt)
            } else {
                let energy = layout
                    .energy
                    .and_then(|i| Some(energy_to_ev(to_number(row.get(i)?), unit(i))))
                    .flatten();
                (energy, None)
            };

            Some(Point {
                index,
                energy_ev,
                kt_kev,
                value,
                uncertainty: layout.uncertainty(row),
            })
        })
        .collect()
}

/// Uncertainty columns are never the measured value
fn is_error_label(label: &str) -> bool {
    label.contains("ERR") || label.starts_with("D(")
}

/// Position of the first candidate present in the labels
fn find_index(labels: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| labels.iter().position(|label| label == candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn dataset(names: &[&str], units: &[&str], rows: Vec<Vec<Scalar>>) -> Dataset {
        Dataset::new(labels(names), labels(units), rows)
    }

    #[test]
    fn value_column_fallback() {
        // no DATA column, skip energies and errors
        let layout = ColumnLayout::resolve(&labels(&["EN", "DATA-ERR", "D(X)", "SIGMA"])).unwrap();
        assert_eq!(layout.value, 3);

        // the E and K-T headings are not excluded
        let layout = ColumnLayout::resolve(&labels(&["E", "DATA-ERR"])).unwrap();
        assert_eq!(layout.value, 0);

        assert!(ColumnLayout::resolve(&labels(&["EN", "ERR-T", "KT"])).is_none());
        assert!(ColumnLayout::resolve(&[]).is_none());
    }

    #[test]
    fn candidate_order() {
        // EN is preferred over ENERGY regardless of column position
        let layout = ColumnLayout::resolve(&labels(&["ENERGY", "DATA", "EN"])).unwrap();
        assert_eq!(layout.energy, Some(2));

        let layout = ColumnLayout::resolve(&labels(&["K-T", "KT", "DATA", "ERR", "DATA-ERR"])).unwrap();
        assert_eq!(layout.temperature, Some(1));
        assert_eq!(layout.error, Some(4));
    }

    #[test]
    fn asymmetric_uncertainty() {
        let data = dataset(
            &["EN", "DATA", "+DATA-ERR", "-DATA-ERR"],
            &["EV", "B", "B", "B"],
            vec![vec![1.0.into(), 10.0.into(), 0.4.into(), (-0.2).into()]],
        );
        let points = extract_points(&data, Quantity::CrossSection, 10);
        assert!((points[0].uncertainty.unwrap() - 0.3).abs() < 1e-12);

        // half a pair is not enough
        let data = dataset(
            &["EN", "DATA", "+DATA-ERR"],
            &["EV", "B", "B"],
            vec![vec![1.0.into(), 10.0.into(), 0.4.into()]],
        );
        assert_eq!(extract_points(&data, Quantity::CrossSection, 10)[0].uncertainty, None);
    }

    #[test]
    fn symmetric_uncertainty_takes_priority() {
        let data = dataset(
            &["DATA", "DATA-ERR", "+DATA-ERR", "-DATA-ERR"],
            &["B", "B", "B", "B"],
            vec![
                vec![1.0.into(), (-0.5).into(), 0.4.into(), 0.2.into()],
                vec![1.0.into(), "-".into(), 0.4.into(), 0.2.into()],
            ],
        );
        let points = extract_points(&data, Quantity::CrossSection, 10);
        assert_eq!(points[0].uncertainty, Some(0.5));
        assert_eq!(points[1].uncertainty, None);
    }

    #[test]
    fn skipped_rows_keep_their_index() {
        let data = dataset(
            &["EN", "DATA"],
            &["KEV", "MB"],
            vec![
                vec![1.0.into(), 5.0.into()],
                vec![2.0.into(), Scalar::Null],
                vec![3.0.into()],
                vec![4.0.into(), "NA".into()],
                vec![5.0.into(), 6.0.into()],
            ],
        );
        let points = extract_points(&data, Quantity::CrossSection, 100);
        let indices: Vec<usize> = points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 4]);
        assert_eq!(points[1].energy_ev, Some(5000.0));
    }

    #[test]
    fn max_points_limits_rows() {
        let rows = (0..10).map(|i| vec![Scalar::from(i as f64)]).collect();
        let data = dataset(&["DATA"], &["B"], rows);

        let points = extract_points(&data, Quantity::CrossSection, 3);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].index, 2);
        assert!(extract_points(&data, Quantity::CrossSection, 0).is_empty());
    }

    #[test]
    fn maxwellian_uses_temperature() {
        let data = dataset(
            &["EN", "KT", "DATA", "ERR-T"],
            &["EV", "EV", "MB", "MB"],
            vec![vec![1.0.into(), 30000.0.into(), 50.0.into(), 2.0.into()]],
        );

        let macs = extract_points(&data, Quantity::Maxwellian, 10);
        assert_eq!(macs[0].energy_ev, None);
        assert_eq!(macs[0].kt_kev, Some(30.0));
        assert_eq!(macs[0].uncertainty, Some(2.0));

        let sig = extract_points(&data, Quantity::CrossSection, 10);
        assert_eq!(sig[0].energy_ev, Some(1.0));
        assert_eq!(sig[0].kt_kev, None);
    }

    #[test]
    fn lower_case_headings() {
        let data = dataset(&["en", "data"], &["mev", "b"], vec![vec![2.0.into(), 3.0.into()]]);
        let points = extract_points(&data, Quantity::CrossSection, 10);
        assert_eq!(points[0].energy_ev, Some(2.0e6));
    }

    #[test]
    fn missing_unit_passes_through() {
        let data = dataset(&["EN", "DATA"], &["MEV"], vec![vec![2.0.into(), 3.0.into()]]);
        let points = extract_points(&data, Quantity::CrossSection, 10);
        assert_eq!(points[0].energy_ev, Some(2.0e6));

        let data = dataset(&["DATA", "EN"], &["B"], vec![vec![3.0.into(), 2.0.into()]]);
        let points = extract_points(&data, Quantity::CrossSection, 10);
        assert_eq!(points[0].energy_ev, Some(2.0));
    }

    #[test]
    fn extraction_is_repeatable() {
        let data = dataset(
            &["EN", "DATA", "DATA-ERR"],
            &["MEV", "B", "B"],
            vec![
                vec![1.0.into(), 2.5.into(), 0.1.into()],
                vec![2.0.into(), "2.7".into(), Scalar::Null],
            ],
        );
        assert_eq!(
            extract_points(&data, Quantity::Angular, 100),
            extract_points(&data, Quantity::Angular, 100)
        );
    }
}
