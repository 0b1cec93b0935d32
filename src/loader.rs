//! CSV loader for the eBid monthly sales export.
//!
//! Reads the header line, then turns each data row into a [`Bid`]:
//!
//! | Column | Field |
//! |--------|-------|
//! | 0 | title |
//! | 1 | id |
//! | 4 | amount (currency string) |
//! | 8 | fund |
//!
//! Fields may be double-quoted, with embedded commas and `""` escapes.
//! Quoted fields spanning several lines are not supported.
//!
//! The file is read as bytes and each line is decoded on its own, so a
//! row that is not valid UTF-8 is skipped like any other malformed row.
//!
//! A malformed row is reported and skipped; it never aborts the load.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{LoadError, RowError};
use crate::table::BidHashTable;
use crate::types::amount::parse_amount;
use crate::types::Bid;

pub const TITLE_COLUMN: usize = 0;
pub const ID_COLUMN: usize = 1;
pub const AMOUNT_COLUMN: usize = 4;
pub const FUND_COLUMN: usize = 8;

/// Minimum number of columns a data row needs
const REQUIRED_COLUMNS: usize = FUND_COLUMN + 1;

/// Outcome of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Bids inserted into the table
    pub loaded: usize,

    /// Rows that were reported and skipped
    pub skipped: Vec<RowError>,
}

impl LoadReport {
    /// Number of skipped rows
    #[inline]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Iterator over the data rows of a bid CSV.
///
/// Yields `Some(Err(..))` for a malformed row and `None` only at the end
/// of data, so the two are never confused.
///
/// # Example
///
/// ```
/// use bid_hashtable::loader::BidReader;
///
/// let csv = "Title,Id,Dept,Date,Amount,Inv,Veh,Rcpt,Fund\n\
///            Desk,98109,Parks,1/1,$27.00,,,,General Fund\n";
/// let mut reader = BidReader::new(csv).unwrap();
///
/// let bid = reader.next().unwrap().unwrap();
/// assert_eq!(bid.id(), "98109");
/// assert!(reader.next().is_none());
/// ```
pub struct BidReader<'a> {
    lines: std::iter::Enumerate<std::slice::Split<'a, u8, fn(&u8) -> bool>>,
    header: Vec<String>,
    line: usize,
}

impl<'a> BidReader<'a> {
    /// Start reading `content`, consuming its header line.
    ///
    /// # Returns
    ///
    /// None if there is no header line
    pub fn new<T: AsRef<[u8]> + ?Sized>(content: &'a T) -> Option<Self> {
        let content = content.as_ref();
        if content.is_empty() {
            return None;
        }

        let mut lines = content.split(is_newline as fn(&u8) -> bool).enumerate();
        let (_, header_line) = lines.next()?;
        let header_line = strip_cr(header_line);
        let header_line = header_line.strip_prefix(UTF8_BOM).unwrap_or(header_line);
        let header = split_record(&String::from_utf8_lossy(header_line));

        Some(Self {
            lines,
            header,
            line: 1,
        })
    }

    /// Column names from the header line
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// 1-based line number of the row most recently returned
    pub fn line(&self) -> usize {
        self.line
    }
}

impl Iterator for BidReader<'_> {
    type Item = Result<Bid, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.lines.next()?;
            self.line = index + 1;

            let text = match std::str::from_utf8(strip_cr(raw)) {
                Ok(text) => text,
                Err(_) => return Some(Err(RowError::InvalidEncoding { line: self.line })),
            };

            if text.trim().is_empty() {
                continue;
            }

            return Some(parse_row(self.line, text));
        }
    }
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

fn is_newline(byte: &u8) -> bool {
    *byte == b'\n'
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse one data row into a bid
pub fn parse_row(line: usize, text: &str) -> Result<Bid, RowError> {
    let fields = split_record(text);
    if fields.len() < REQUIRED_COLUMNS {
        return Err(RowError::MissingColumn {
            line,
            expected: REQUIRED_COLUMNS,
            found: fields.len(),
        });
    }

    let raw_amount = &fields[AMOUNT_COLUMN];
    let amount = parse_amount(raw_amount).ok_or_else(|| RowError::InvalidAmount {
        line,
        value: raw_amount.clone(),
    })?;

    Ok(Bid::new(
        fields[ID_COLUMN].trim(),
        fields[TITLE_COLUMN].trim(),
        fields[FUND_COLUMN].trim(),
        amount,
    ))
}

/// Split one CSV line into fields, honouring double quotes.
///
/// # Example
///
/// ```
/// use bid_hashtable::loader::split_record;
///
/// assert_eq!(split_record(r#"a,"b, c","say ""hi""""#), vec!["a", "b, c", r#"say "hi""#]);
/// ```
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

/// Load every bid from a CSV file into `table`.
///
/// # Errors
///
/// [`LoadError`] if the file cannot be read or has no header line.
/// Malformed rows and rejected inserts are skipped and listed in the
/// returned [`LoadReport`].
pub fn load_bids<P: AsRef<Path>>(path: P, table: &mut BidHashTable) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    info!("Loading CSV file {}", path.display());

    let content = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader =
        BidReader::new(&content).ok_or_else(|| LoadError::EmptyFile(path.to_path_buf()))?;
    debug!("header: {}", reader.header().join(" | "));

    let report = load_records(reader, table);
    info!(
        "loaded {} bids from {} ({} rows skipped)",
        report.loaded,
        path.display(),
        report.skipped_count()
    );

    Ok(report)
}

/// Insert every row of `reader` into `table`
pub fn load_records(mut reader: BidReader<'_>, table: &mut BidHashTable) -> LoadReport {
    let mut report = LoadReport::default();

    while let Some(row) = reader.next() {
        let line = reader.line();
        let result = row.and_then(|bid| {
            table
                .insert(bid)
                .map_err(|source| RowError::Rejected { line, source })
        });

        match result {
            Ok(_) => report.loaded += 1,
            Err(err) => {
                warn!("skipping row: {}", err);
                report.skipped.push(err);
            }
        }
    }

    report
}

// ============================================================================
// Unit Tests
// ============================================================================
