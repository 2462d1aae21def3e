use super::{CardRecord, Pid};
use std::{collections::HashMap, convert::TryFrom, error::Error};

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub pid: Pid,
    pub name: String,
    pub net_id: String,
    pub present: bool,
}

impl TryFrom<RosterFields> for RosterEntry {
    type Error = RosterFieldsError;

    fn try_from(fields: RosterFields) -> Result<Self, Self::Error> {
        let pid = fields.student_id.trim();
        if pid.is_empty() {
            return Err(RosterFieldsError::EmptyStudentId);
        }

        Ok(RosterEntry {
            pid: Pid(pid.into()),
            name: fields.student_name.trim().into(),
            net_id: fields.net_id.trim().into(),
            present: false,
        })
    }
}

pub const ROSTER_COLUMNS: [&str; 3] = ["Student_ID", "Student_Name", "MSUNet_ID"];

/// One class-list row as the csv crate hands it over. Any other columns in
/// the file are ignored.
#[derive(serde::Deserialize, Debug)]
pub struct RosterFields {
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Student_Name")]
    pub student_name: String,
    #[serde(rename = "MSUNet_ID")]
    pub net_id: String,
}

#[derive(Debug, PartialEq)]
pub enum RosterFieldsError {
    EmptyStudentId,
}

impl std::fmt::Display for RosterFieldsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentId => write!(f, "\"Student_ID\" field is blank"),
        }
    }
}

impl Error for RosterFieldsError {}

/// A card matched against the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub name: String,
    pub card: CardRecord,
    pub pid: Pid,
    pub net_id: String,
}

/// Every class-list entry, kept in the order the rows were loaded.
#[derive(Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    index: HashMap<Pid, usize>,
}

impl Roster {
    /// Adds an entry. Re-adding a pid overwrites the earlier entry in place,
    /// so it keeps its original position. Returns true in that case.
    pub fn insert(&mut self, entry: RosterEntry) -> bool {
        match self.index.get(&entry.pid) {
            Some(&i) => {
                self.entries[i] = entry;
                true
            }
            None => {
                self.index.insert(entry.pid.clone(), self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }

    /// Looks the card up by its roster-form id and marks the entry present.
    /// Cards nobody on the roster owns give `None` and are left out of the
    /// attendance.
    pub fn reconcile(&mut self, card: &CardRecord) -> Option<EnrichedRecord> {
        let pid = card.apid.to_pid();
        let entry = &mut self.entries[*self.index.get(&pid)?];
        entry.present = true;

        Some(EnrichedRecord {
            name: entry.name.clone(),
            card: card.clone(),
            pid,
            net_id: entry.net_id.clone(),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn absent(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries().filter(|entry| !entry.present)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
