//! Library of parser functions for fixed-format EXFOR records

// internal modules
use crate::scalar::Scalar;

// standard library
use std::format as f;

// external crates
use log::warn;

// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, one_of};
use nom::combinator::{eof, opt, recognize, value};
use nom::number::complete::double;
use nom::sequence::{pair, terminated};
use nom::IResult;

/// Width of a single EXFOR field
pub(crate) const FIELD_WIDTH: usize = 11;

/// Number of fields in the content part of a record
pub(crate) const FIELDS_PER_RECORD: usize = 6;

/// System identifiers that control the structure of an EXFOR file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SystemId {
    Entry,
    EndEntry,
    Subent,
    EndSubent,
    NoSubent,
    Bib,
    EndBib,
    NoBib,
    Common,
    EndCommon,
    NoCommon,
    Data,
    EndData,
    NoData,
}

impl SystemId {
    /// Keyword as written in columns 1-10
    pub(crate) fn keyword(&self) -> &str {
        match self {
            SystemId::Entry => "ENTRY",
            SystemId::EndEntry => "ENDENTRY",
            SystemId::Subent => "SUBENT",
            SystemId::EndSubent => "ENDSUBENT",
            SystemId::NoSubent => "NOSUBENT",
            SystemId::Bib => "BIB",
            SystemId::EndBib => "ENDBIB",
            SystemId::NoBib => "NOBIB",
            SystemId::Common => "COMMON",
            SystemId::EndCommon => "ENDCOMMON",
            SystemId::NoCommon => "NOCOMMON",
            SystemId::Data => "DATA",
            SystemId::EndData => "ENDDATA",
            SystemId::NoData => "NODATA",
        }
    }
}

/// A record that starts with a system identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ControlRecord {
    pub(crate) id: SystemId,
    /// First numeric field (columns 12-22), trimmed
    pub(crate) n1: String,
    /// Second numeric field (columns 23-33), trimmed
    pub(crate) n2: String,
}

impl ControlRecord {
    /// N1 interpreted as a count
    pub(crate) fn count(&self) -> Option<usize> {
        self.n1.parse().ok()
    }
}

/// Slice of a record between two character columns, padded with nothing
///
/// Operates on characters rather than bytes so that stray non-ASCII text in
/// free-text BIB records can never split a code point.
pub(crate) fn columns(line: &str, start: usize, end: usize) -> &str {
    let mut indices = line.char_indices().map(|(i, _)| i).chain([line.len()]);
    let Some(lower) = indices.nth(start) else {
        return "";
    };
    let upper = indices.nth(end.saturating_sub(start + 1)).unwrap_or(line.len());
    &line[lower..upper]
}

/// The keyword part of a record (columns 1-10), trimmed
pub(crate) fn keyword(line: &str) -> &str {
    columns(line, 0, 10).trim()
}

/// The pointer part of a record (column 11)
pub(crate) fn pointer(line: &str) -> char {
    columns(line, 10, 11).chars().next().unwrap_or(' ')
}

/// The six 11-character fields of a record, untrimmed
pub(crate) fn fields(line: &str) -> Vec<&str> {
    (0..FIELDS_PER_RECORD)
        .map(|n| columns(line, n * FIELD_WIDTH, (n + 1) * FIELD_WIDTH))
        .collect()
}

/// Check a record for a system identifier
///
/// Returns `None` for anything that is not a control record, such as BIB
/// text or data values.
pub(crate) fn control_record(line: &str) -> Option<ControlRecord> {
    let (_, id) = system_id(keyword(line)).ok()?;
    Some(ControlRecord {
        id,
        n1: columns(line, 11, 22).trim().to_string(),
        n2: columns(line, 22, 33).trim().to_string(),
    })
}

/// Exact match on any of the known system identifiers
fn system_id(i: &str) -> IResult<&str, SystemId> {
    terminated(
        alt((
            value(SystemId::EndEntry, tag("ENDENTRY")),
            value(SystemId::Entry, tag("ENTRY")),
            value(SystemId::EndSubent, tag("ENDSUBENT")),
            value(SystemId::NoSubent, tag("NOSUBENT")),
            value(SystemId::Subent, tag("SUBENT")),
            value(SystemId::EndBib, tag("ENDBIB")),
            value(SystemId::NoBib, tag("NOBIB")),
            value(SystemId::Bib, tag("BIB")),
            value(SystemId::EndCommon, tag("ENDCOMMON")),
            value(SystemId::NoCommon, tag("NOCOMMON")),
            value(SystemId::Common, tag("COMMON")),
            value(SystemId::EndData, tag("ENDDATA")),
            value(SystemId::NoData, tag("NODATA")),
            value(SystemId::Data, tag("DATA")),
        )),
        eof,
    )(i)
}

/// Numbers in EXFOR notation, including the abbreviated exponent
///
/// EXFOR allows the `E` to be dropped to save space in the 11 character
/// fields, so `1.23+5` is 1.23e5 and `-4.5-3` is -4.5e-3. Standard notation
/// is also accepted.
pub(crate) fn exfor_f64(i: &str) -> IResult<&str, f64> {
    let (i, value) = double(i)?;
    let (i, exponent) = opt(recognize(pair(one_of("-+"), digit1)))(i)?;

    let number = match exponent {
        Some(exponent) => f!("{value}e{exponent}").parse().unwrap_or(value),
        None => value,
    };
    Ok((i, number))
}

/// Interpret a single data field
///
/// Blank fields are [Scalar::Null], numbers are [Scalar::Number], and
/// anything else is kept as trimmed [Scalar::Text] with a warning.
pub(crate) fn scalar(field: &str) -> Scalar {
    let field = field.trim();
    if field.is_empty() {
        return Scalar::Null;
    }

    match terminated(exfor_f64, eof)(field) {
        Ok((_, number)) => Scalar::Number(number),
        Err(_) => {
            warn!("Non-numeric data field \"{field}\" kept as text");
            Scalar::Text(field.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns() {
        assert_eq!(columns("ENTRY            10001", 0, 10), "ENTRY     ");
        assert_eq!(columns("ABC", 0, 10), "ABC");
        assert_eq!(columns("ABC", 5, 10), "");
        assert_eq!(columns("ÅBCDE", 1, 3), "BC");
    }

    #[test]
    fn test_control_records() {
        let record = control_record("SUBENT        10001002   20050819").unwrap();
        assert_eq!(record.id, SystemId::Subent);
        assert_eq!(record.n1, "10001002");

        let record = control_record("DATA                 3          2").unwrap();
        assert_eq!(record.id, SystemId::Data);
        assert_eq!(record.count(), Some(3));
        assert_eq!(record.n2, "2");

        assert_eq!(control_record("ENDDATA").unwrap().id, SystemId::EndData);
        assert_eq!(control_record("ENDENTRY").unwrap().id, SystemId::EndEntry);
    }

    #[test]
    fn test_not_control_records() {
        // headings and BIB keywords are not structural
        assert!(control_record("DATA-ERR   EN").is_none());
        assert!(control_record("REACTION   (26-FE-56(N,TOT),,SIG)").is_none());
        assert!(control_record("").is_none());
        assert!(control_record(" 1.0        2.5").is_none());
    }

    #[test]
    fn test_headings() {
        let line = "EN         DATA      1DATA-ERR  1";
        let f = fields(line);
        assert_eq!(f.len(), 6);
        assert_eq!(keyword(f[1]), "DATA");
        assert_eq!(pointer(f[1]), '1');
        assert_eq!(pointer(f[0]), ' ');
        assert_eq!(f[5], "");
    }

    #[test]
    fn test_exfor_numbers() {
        assert_eq!(exfor_f64("1.23+5"), Ok(("", 123000.0)));
        assert_eq!(exfor_f64("-4.5-3"), Ok(("", -0.0045)));
        assert_eq!(exfor_f64("2.5E+02"), Ok(("", 250.0)));
        assert_eq!(exfor_f64("12"), Ok(("", 12.0)));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(scalar("           "), Scalar::Null);
        assert_eq!(scalar(" 1.0+6     "), Scalar::Number(1.0e6));
        assert_eq!(scalar(" 0.1       "), Scalar::Number(0.1));
        assert_eq!(scalar(" GT        "), Scalar::Text("GT".to_string()));
        assert_eq!(scalar(" 1.0 2.0   "), Scalar::Text("1.0 2.0".to_string()));
    }
}
