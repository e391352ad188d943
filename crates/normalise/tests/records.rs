//! Integration tests for normalising parsed EXFOR datasets

use x4tools_normalise::{extract_points, map_projectile, parse_target, Quantity};
use x4tools_x4::{parse_x4, DatasetKey, DatasetMap, BLANK_POINTER};

use rstest::{fixture, rstest};

const MACS_ENTRY: &str = "\
ENTRY            30001   20101012
SUBENT        30001001   20101012
BIB                  1          1
TITLE      Maxwellian averaged capture on gold
ENDBIB               1
NOCOMMON             0          0
ENDSUBENT            3
SUBENT        30001002   20101012
BIB                  1          1
REACTION   (79-AU-197(N,G)79-AU-198,,SIG,,MXW)
ENDBIB               1
NOCOMMON             0          0
DATA                 3          3
KT         DATA       DATA-ERR
KEV        MB         MB
 5.0        1.7+3      5.0+1
 30.0       582.0      9.0
 1.0+2       -          -
ENDDATA              5
ENDSUBENT           10
ENDENTRY             2
";

#[fixture]
fn datasets() -> DatasetMap {
    let entries = parse_x4(MACS_ENTRY).unwrap();
    entries[0].simplified_datasets()
}

#[rstest]
fn maxwellian_points(datasets: DatasetMap) {
    let dataset = &datasets[&DatasetKey::new("30001", "30001002", BLANK_POINTER)];
    let points = extract_points(dataset, Quantity::Maxwellian, 5000);

    // the placeholder row is dropped
    assert_eq!(points.len(), 2);

    assert_eq!(points[0].index, 0);
    assert_eq!(points[0].kt_kev, Some(5.0));
    assert_eq!(points[0].value, 1700.0);
    assert_eq!(points[0].uncertainty, Some(50.0));
    assert!(points.iter().all(|p| p.energy_ev.is_none()));

    assert_eq!(points[1].index, 1);
    assert_eq!(points[1].kt_kev, Some(30.0));
}

#[rstest]
fn energy_only_for_other_quantities(datasets: DatasetMap) {
    let dataset = &datasets[&DatasetKey::new("30001", "30001002", BLANK_POINTER)];
    let points = extract_points(dataset, Quantity::CrossSection, 5000);

    // no energy heading, so nothing to attach
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| p.energy_ev.is_none() && p.kt_kev.is_none()));
}

#[rstest]
#[case("AU-197", "N", Some((79, 197, 0)), Some("n"))]
#[case("AM-242-M", "A", Some((95, 242, 1)), Some("a"))]
#[case("HE-3", "HE3", Some((2, 3, 0)), Some("h"))]
#[case("NN-1", "E", None, None)]
fn index_fields(
    #[case] target: &str,
    #[case] projectile: &str,
    #[case] nuclide: Option<(u8, u16, u32)>,
    #[case] code: Option<&str>,
) {
    assert_eq!(parse_target(target), nuclide);
    assert_eq!(map_projectile(projectile), code);
}
