use super::types::{RosterEntry, RosterFields, ROSTER_COLUMNS};
use calamine::{open_workbook_auto, Data, Reader};
use log::info;
use std::{
    convert::TryFrom,
    error::Error,
    fs::File,
    path::{Path, PathBuf},
};

/// Reads every raw scan line from a `.txt` or `.xlsx` scanner export.
pub fn read_scan_lines(path: &Path) -> Result<Vec<String>, InputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let lines = match extension.as_deref() {
        Some("txt") => read_text_lines(path)?,
        Some("xlsx") => read_workbook_lines(path)?,
        _ => return Err(InputError::UnsupportedExtension(path.into())),
    };

    info!("Read {} scan lines from {}", lines.len(), path.display());
    Ok(lines)
}

fn read_text_lines(path: &Path) -> Result<Vec<String>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Open {
        path: path.into(),
        source,
    })?;

    Ok(text.lines().map(String::from).collect())
}

// First column of the first sheet; there's no header row.
fn read_workbook_lines(path: &Path) -> Result<Vec<String>, InputError> {
    let workbook_error = |source: calamine::Error| InputError::Workbook {
        path: path.into(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InputError::EmptyWorkbook(path.into()))?
        .map_err(workbook_error)?;

    let (first_row, last_row) = match (range.start(), range.end()) {
        (Some((first_row, _)), Some((last_row, _))) => (first_row, last_row),
        _ => return Ok(Vec::new()),
    };

    // Positions are absolute, so column A is found even if the used range
    // starts further right.
    Ok((first_row..=last_row)
        .map(|row| range.get_value((row, 0)).map(cell_text).unwrap_or_default())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // Ids typed into a numeric cell come back as floats
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        other => other.to_string(),
    }
}

/// Iterates over the entries of a class-list CSV. The first bad row ends the
/// run, since a missing entry would corrupt the absence table.
pub struct RosterFileReader<R: std::io::Read> {
    path: PathBuf,
    row: usize,
    record_iter: csv::DeserializeRecordsIntoIter<R, RosterFields>,
}

impl RosterFileReader<File> {
    pub fn new(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.into(),
            source,
        })?;

        Self::from_reader(path, file)
    }
}

impl<R: std::io::Read> RosterFileReader<R> {
    /// `path` only labels errors. The header row is checked up front, so a
    /// class list missing a column is rejected even when it has no rows.
    pub fn from_reader(path: &Path, reader: R) -> Result<Self, InputError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header_error = |reason: String| InputError::RosterHeader {
            path: path.into(),
            reason,
        };

        let headers = reader.headers().map_err(|e| header_error(e.to_string()))?;
        if let Some(column) = ROSTER_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(header_error(format!("missing \"{}\" column", column)));
        }

        Ok(Self {
            path: path.into(),
            row: 0,
            record_iter: reader.into_deserialize(),
        })
    }

    fn malformed(&self, reason: &dyn Error) -> InputError {
        InputError::MalformedRosterRow {
            path: self.path.clone(),
            row: self.row,
            reason: reason.to_string(),
        }
    }
}

impl<R: std::io::Read> Iterator for RosterFileReader<R> {
    type Item = Result<RosterEntry, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.record_iter.next()?;
        self.row += 1;

        Some(match result {
            Ok(fields) => RosterEntry::try_from(fields).map_err(|e| self.malformed(&e)),
            Err(e) => Err(self.malformed(&e)),
        })
    }
}

#[derive(Debug)]
pub enum InputError {
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    UnsupportedExtension(PathBuf),
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },
    EmptyWorkbook(PathBuf),
    RosterHeader {
        path: PathBuf,
        reason: String,
    },
    MalformedRosterRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },
    Write {
        path: PathBuf,
        source: csv::Error,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Unable to read {}: {}", path.display(), source)
            }
            Self::UnsupportedExtension(path) => write!(
                f,
                "Unsupported input file {} (expected .txt or .xlsx)",
                path.display()
            ),
            Self::Workbook { path, source } => {
                write!(f, "Unable to read workbook {}: {}", path.display(), source)
            }
            Self::EmptyWorkbook(path) => {
                write!(f, "Workbook {} has no worksheets", path.display())
            }
            Self::RosterHeader { path, reason } => {
                write!(f, "Malformed class list {} header: {}", path.display(), reason)
            }
            Self::MalformedRosterRow { path, row, reason } => write!(
                f,
                "Malformed class list {}, row {}: {}",
                path.display(),
                row,
                reason
            ),
            Self::Write { path, source } => {
                write!(f, "Unable to write {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for InputError {}
