use super::Apid;
use std::error::Error;

pub const SENTINEL: char = '%';
pub const DELIMITER: char = '^';

/// Where the id starts inside the third field, counted in characters.
pub const APID_OFFSET: usize = 7;
pub const APID_WIDTH: usize = 9;

/// Stands in for the card id on rows typed in by hand.
pub const NO_PID: &str = "No PID Available";

#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub name: String,
    pub apid: Apid,
}

/// A name typed in by the operator instead of a card swipe. Has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanRecord {
    Card(CardRecord),
    Manual(ManualRecord),
}

impl ScanRecord {
    /// Never fails: anything that isn't a well-formed card swipe becomes a
    /// manual record holding the trimmed line. Empty lines are kept.
    pub fn parse(line: &str) -> Self {
        Self::try_parse(line).unwrap_or_else(|_| Self::manual(line))
    }

    /// Like `parse`, but reports sentinel lines that couldn't be split into
    /// a card record instead of quietly downgrading them.
    pub fn try_parse(line: &str) -> Result<Self, ScanLineError> {
        if !line.starts_with(SENTINEL) {
            return Ok(Self::manual(line));
        }

        let mut fields = line.split(DELIMITER);
        let (name, id_field) = match (fields.next(), fields.next(), fields.next()) {
            (Some(_), Some(name), Some(id_field)) => (name, id_field),
            _ => return Err(ScanLineError::TooFewFields),
        };

        if id_field.chars().count() < APID_OFFSET + APID_WIDTH {
            return Err(ScanLineError::IdFieldTooShort(id_field.into()));
        }

        let apid = id_field
            .chars()
            .skip(APID_OFFSET)
            .take(APID_WIDTH)
            .collect::<String>();
        let apid = apid.trim();
        if apid.is_empty() {
            return Err(ScanLineError::BlankId);
        }

        Ok(Self::Card(CardRecord {
            name: name.trim().into(),
            apid: Apid(apid.into()),
        }))
    }

    pub(crate) fn manual(line: &str) -> Self {
        Self::Manual(ManualRecord {
            name: line.trim().into(),
        })
    }
}

/// Why a line starting with the sentinel isn't a usable card swipe.
#[derive(Debug, PartialEq)]
pub enum ScanLineError {
    TooFewFields,
    IdFieldTooShort(String),
    BlankId,
}

impl std::fmt::Display for ScanLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewFields => write!(
                f,
                "Card swipe has fewer than three \"{}\"-separated fields",
                DELIMITER
            ),
            Self::IdFieldTooShort(field) => {
                write!(f, "Card id field \"{}\" is too short to hold an id", field)
            }
            Self::BlankId => write!(f, "Card id is blank"),
        }
    }
}

impl Error for ScanLineError {}

#[cfg(test)]
mod tests {
    use super::{CardRecord, ManualRecord, ScanLineError, ScanRecord};
    use crate::types::Apid;

    fn card(name: &str, apid: &str) -> ScanRecord {
        ScanRecord::Card(CardRecord {
            name: name.into(),
            apid: Apid(apid.into()),
        })
    }

    fn manual(name: &str) -> ScanRecord {
        ScanRecord::Manual(ManualRecord { name: name.into() })
    }

    #[test]
    fn test_card_swipe() {
        assert_eq!(
            ScanRecord::parse("%B6009050^DOE, JANE^6009050A1234567B=2405?"),
            card("DOE, JANE", "A1234567B")
        );

        // Padding around the name doesn't move the id
        assert_eq!(
            ScanRecord::parse("%B6009050^   DOE, JANE      ^6009050A1234567B=2405?\n"),
            card("DOE, JANE", "A1234567B")
        );

        // Extra fields are ignored
        assert_eq!(
            ScanRecord::parse("%^SMITH, JOHN^0000000Z7654321C^foo^bar"),
            card("SMITH, JOHN", "Z7654321C")
        );
    }

    #[test]
    fn test_id_width() {
        let lines = [
            "%^A^6009050A1234567B",
            "%^A B C^6009050A1234567B=24051200000?",
            "%^\tA\t^6009050A1234567BXXXXXXXXXX",
        ];

        for line in lines {
            match ScanRecord::parse(line) {
                ScanRecord::Card(record) => assert_eq!(record.apid.0.chars().count(), 9),
                other => panic!("{:?} not parsed as a card", other),
            }
        }
    }

    #[test]
    fn test_manual_entry() {
        assert_eq!(ScanRecord::parse("Smith, John"), manual("Smith, John"));
        assert_eq!(ScanRecord::parse("  Smith, John \r\n"), manual("Smith, John"));

        // The sentinel must be the very first character
        assert_eq!(
            ScanRecord::parse(" %^DOE, JANE^6009050A1234567B"),
            manual("%^DOE, JANE^6009050A1234567B")
        );
    }

    #[test]
    fn test_empty_line_is_kept() {
        assert_eq!(ScanRecord::parse(""), manual(""));
        assert_eq!(ScanRecord::parse("   "), manual(""));
    }

    #[test]
    fn test_malformed_swipe() {
        assert_eq!(
            ScanRecord::try_parse("%^DOE, JANE"),
            Err(ScanLineError::TooFewFields)
        );
        assert_eq!(ScanRecord::try_parse("%"), Err(ScanLineError::TooFewFields));
        assert_eq!(
            ScanRecord::try_parse("%^DOE, JANE^A1234567B"),
            Err(ScanLineError::IdFieldTooShort("A1234567B".into()))
        );
        assert_eq!(
            ScanRecord::try_parse("%^DOE, JANE^6009050         "),
            Err(ScanLineError::BlankId)
        );

        // ...and `parse` falls back to the whole line as a name
        assert_eq!(ScanRecord::parse("%^DOE, JANE"), manual("%^DOE, JANE"));
    }
}
