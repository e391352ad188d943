//! Element symbol lookups

/// Element symbols in order of atomic number, as written in EXFOR
///
/// The index of a symbol is one less than its atomic number.
pub const ELEMENTS: [&str; 118] = [
    "H", "HE", "LI", "BE", "B", "C", "N", "O", "F", "NE", // 1-10
    "NA", "MG", "AL", "SI", "P", "S", "CL", "AR", "K", "CA", // 11-20
    "SC", "TI", "V", "CR", "MN", "FE", "CO", "NI", "CU", "ZN", // 21-30
    "GA", "GE", "AS", "SE", "BR", "KR", "RB", "SR", "Y", "ZR", // 31-40
    "NB", "MO", "TC", "RU", "RH", "PD", "AG", "CD", "IN", "SN", // 41-50
    "SB", "TE", "I", "XE", "CS", "BA", "LA", "CE", "PR", "ND", // 51-60
    "PM", "SM", "EU", "GD", "TB", "DY", "HO", "ER", "TM", "YB", // 61-70
    "LU", "HF", "TA", "W", "RE", "OS", "IR", "PT", "AU", "HG", // 71-80
    "TL", "PB", "BI", "PO", "AT", "RN", "FR", "RA", "AC", "TH", // 81-90
    "PA", "U", "NP", "PU", "AM", "CM", "BK", "CF", "ES", "FM", // 91-100
    "MD", "NO", "LR", "RF", "DB", "SG", "BH", "HS", "MT", "DS", // 101-110
    "RG", "CN", "NH", "FL", "MC", "LV", "TS", "OG", // 111-118
];

/// Atomic number for an upper case element symbol
///
/// Matching is case sensitive, so only the EXFOR convention is accepted.
///
/// ```rust
/// # use x4tools_normalise::atomic_number;
/// assert_eq!(atomic_number("FE"), Some(26));
/// assert_eq!(atomic_number("OG"), Some(118));
/// assert_eq!(atomic_number("Fe"), None);
/// assert_eq!(atomic_number("XX"), None);
/// ```
pub fn atomic_number(symbol: &str) -> Option<u8> {
    ELEMENTS
        .iter()
        .position(|s| *s == symbol)
        .map(|i| (i + 1) as u8)
}

/// Element symbol for an atomic number
///
/// ```rust
/// # use x4tools_normalise::element_symbol;
/// assert_eq!(element_symbol(1), Some("H"));
/// assert_eq!(element_symbol(0), None);
/// assert_eq!(element_symbol(119), None);
/// ```
pub fn element_symbol(z: u8) -> Option<&'static str> {
    ELEMENTS.get((z as usize).checked_sub(1)?).copied()
}
