//! Line-by-line reader for EXFOR files

// standard library
use std::path::Path;

// internal modules
use crate::entry::{Column, Entry, Reaction, Section, Subentry};
use crate::error::{Error, Result};
use crate::parsers::{self, control_record, ControlRecord, SystemId, FIELDS_PER_RECORD};

// external crates
use log::{debug, trace, warn};

/// Read every entry from an EXFOR file
///
/// Files written by x4i3 contain a single entry, but concatenated files are
/// handled all the same.
///
/// ```rust, no_run
/// # use x4tools_x4::read_x4;
/// let entries = read_x4("path/to/100/10001.x4").unwrap();
/// ```
pub fn read_x4<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let content = std::fs::read_to_string(path)?;
    parse_x4(&content)
}

/// Parse every entry from the text of an EXFOR file
///
/// Anything outside of `ENTRY`/`ENDENTRY` pairs (request headers, library
/// records, etc...) is ignored.
pub fn parse_x4(content: &str) -> Result<Vec<Entry>> {
    Reader::new(content).read()
}

/// Internal reader over the lines of an EXFOR file
pub(crate) struct Reader<'a> {
    lines: std::str::Lines<'a>,
    line_number: usize,
}

// ! Internal API
impl<'a> Reader<'a> {
    pub(crate) fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line_number: 0,
        }
    }

    /// Advance to the next line, if there is one
    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line)
    }

    /// Advance to the next line, failing at the end of the file
    fn expect_line(&mut self, context: &str) -> Result<&'a str> {
        self.next_line()
            .ok_or_else(|| Error::UnexpectedEndOfFile(context.to_string()))
    }

    /// Parse the file into entries
    pub(crate) fn read(&mut self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        let mut current: Option<Entry> = None;

        while let Some(line) = self.next_line() {
            let Some(record) = control_record(line) else {
                continue;
            };

            match record.id {
                SystemId::Entry => {
                    if let Some(entry) = current.take() {
                        warn!("Entry {} has no ENDENTRY record", entry.accession);
                        entries.push(entry);
                    }
                    trace!("Reading entry {}", record.n1);
                    current = Some(Entry::new(record.n1));
                }
                SystemId::Subent => {
                    let entry = current.as_mut().ok_or_else(|| Error::UnexpectedKeyword {
                        line: self.line_number,
                        expected: SystemId::Entry.keyword().to_string(),
                        found: SystemId::Subent.keyword().to_string(),
                    })?;
                    let subentry = self.read_subentry(record.n1)?;
                    entry.subentries.push(subentry);
                }
                SystemId::EndEntry => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                // NOSUBENT and anything left over between subentries
                _ => (),
            }
        }

        if let Some(entry) = current.take() {
            warn!("Entry {} has no ENDENTRY record", entry.accession);
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read everything up to and including `ENDSUBENT`
    fn read_subentry(&mut self, accession: String) -> Result<Subentry> {
        let context = format!("SUBENT {accession}");
        let mut subentry = Subentry {
            accession,
            ..Default::default()
        };

        loop {
            let line = self.expect_line(&context)?;
            let Some(record) = control_record(line) else {
                continue;
            };

            match record.id {
                SystemId::Bib => subentry.reactions = self.read_bib(&context)?,
                SystemId::Common => {
                    subentry.common = Some(self.read_section(&record, SystemId::EndCommon)?)
                }
                SystemId::Data => {
                    subentry.data = Some(self.read_section(&record, SystemId::EndData)?)
                }
                SystemId::EndSubent => return Ok(subentry),
                SystemId::NoBib | SystemId::NoCommon | SystemId::NoData => (),
                _ => {
                    return Err(Error::UnexpectedKeyword {
                        line: self.line_number,
                        expected: SystemId::EndSubent.keyword().to_string(),
                        found: record.id.keyword().to_string(),
                    })
                }
            }
        }
    }

    /// Collect the REACTION keywords from a BIB section
    fn read_bib(&mut self, context: &str) -> Result<Vec<Reaction>> {
        let mut reactions: Vec<Reaction> = Vec::new();
        let mut current_keyword = String::new();

        loop {
            let line = self.expect_line(context)?;
            let keyword = parsers::keyword(line);

            if keyword == SystemId::EndBib.keyword() {
                return Ok(reactions);
            }

            if !keyword.is_empty() {
                current_keyword = keyword.to_string();
            }

            if current_keyword != "REACTION" {
                continue;
            }

            let pointer = parsers::pointer(line);
            let text = parsers::columns(line, 11, 66).trim();

            match reactions.last_mut() {
                Some(last) if keyword.is_empty() && pointer == ' ' => last.text.push_str(text),
                _ => reactions.push(Reaction {
                    pointer,
                    text: text.to_string(),
                }),
            }
        }
    }

    /// Read a COMMON or DATA table up to its terminating record
    ///
    /// Headings, units, and each row of values span `ceil(N1/6)` records.
    fn read_section(&mut self, header: &ControlRecord, end: SystemId) -> Result<Section> {
        let start_line = self.line_number;
        let context = format!("{} section on line {start_line}", header.id.keyword());

        let n_fields = header.count().ok_or_else(|| Error::ParseError {
            line: start_line,
            reason: format!("invalid field count \"{}\"", header.n1),
        })?;

        let mut records = Vec::new();
        loop {
            let line = self.expect_line(&context)?;
            if parsers::keyword(line) == end.keyword() {
                break;
            }
            records.push(line);
        }

        if n_fields == 0 {
            return Ok(Section::default());
        }

        let records_per_row = n_fields.div_ceil(FIELDS_PER_RECORD);
        if records.len() < 2 * records_per_row {
            return Err(Error::IncompleteSection {
                section: header.id.keyword().to_string(),
                line: start_line,
            });
        }

        let mut chunks = records.chunks(records_per_row);
        let headings = row_fields(chunks.next().unwrap_or_default(), n_fields);
        let units = row_fields(chunks.next().unwrap_or_default(), n_fields);

        let columns = headings
            .iter()
            .zip(units.iter())
            .map(|(heading, unit)| Column {
                label: parsers::keyword(heading).to_string(),
                pointer: parsers::pointer(heading),
                unit: unit.trim().to_string(),
            })
            .collect();

        let rows: Vec<_> = chunks
            .map(|chunk| {
                row_fields(chunk, n_fields)
                    .into_iter()
                    .map(parsers::scalar)
                    .collect()
            })
            .collect();

        if header.id == SystemId::Data && header.n2.parse::<usize>().ok() != Some(rows.len()) {
            debug!(
                "{context} declares {} rows but {} were read",
                header.n2,
                rows.len()
            );
        }

        Ok(Section { columns, rows })
    }
}

/// Fields of a logical row spread over one or more records
fn row_fields<'a>(records: &[&'a str], n_fields: usize) -> Vec<&'a str> {
    let mut fields: Vec<&str> = records.iter().flat_map(|&r| parsers::fields(r)).collect();
    fields.resize(n_fields, "");
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;

    const ENTRY: &str = "\
ENTRY            10001   20050819
SUBENT        10001001   20050819
BIB                  2          3
TITLE      Total cross section of iron
AUTHOR     (A.N.Other)
ENDBIB               3
NOCOMMON             0          0
ENDSUBENT            5
SUBENT        10001002   20050819
BIB                  1          2
REACTION  1(26-FE-56(N,EL)26-FE-56,,SIG)
          2(26-FE-56(N,INL)26-FE-56,
           ,SIG)
ENDBIB               2
COMMON               1          3
ERR-S
PER-CENT
 2.0
ENDCOMMON            3
DATA                 7          1
EN         DATA      1DATA      2DATA-ERR  1DATA-ERR  2MONIT
EN-RSL
MEV        B          B          B          B          B
MEV
 1.0        2.5        1.1+0      0.1        0.05       3.0
 1.0-2
ENDDATA              5
ENDSUBENT            8
ENDENTRY             2
";

    #[test]
    fn read_entry() {
        let entries = parse_x4(ENTRY).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.accession, "10001");
        assert_eq!(entry.subentries.len(), 2);
        assert!(entry.subentries[0].common.is_none());
        assert!(entry.subentries[0].reactions.is_empty());
    }

    #[test]
    fn read_reactions() {
        let entries = parse_x4(ENTRY).unwrap();
        let subentry = &entries[0].subentries[1];
        assert_eq!(subentry.reactions.len(), 2);
        assert_eq!(subentry.reactions[0].pointer, '1');
        assert_eq!(subentry.reactions[1].text, "(26-FE-56(N,INL)26-FE-56,,SIG)");
    }

    #[test]
    fn read_multi_record_rows() {
        let entries = parse_x4(ENTRY).unwrap();
        let data = entries[0].subentries[1].data.as_ref().unwrap();

        assert_eq!(data.columns.len(), 7);
        assert_eq!(data.columns[6].label, "EN-RSL");
        assert_eq!(data.columns[6].unit, "MEV");
        assert_eq!(data.columns[2].pointer, '2');

        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.rows[0][2], Scalar::Number(1.1));
        assert_eq!(data.rows[0][6], Scalar::Number(0.01));
    }

    #[test]
    fn missing_terminator() {
        let truncated = "ENTRY            10001\nSUBENT        10001002\nDATA                 1          1\nDATA\nB\n 1.0\n";
        assert!(matches!(
            parse_x4(truncated),
            Err(Error::UnexpectedEndOfFile(_))
        ));
    }

    #[test]
    fn subentry_outside_entry() {
        let orphan = "SUBENT        10001002\nENDSUBENT\n";
        assert!(matches!(
            parse_x4(orphan),
            Err(Error::UnexpectedKeyword { line: 1, .. })
        ));
    }
}
