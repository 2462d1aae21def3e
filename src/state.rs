use super::types::{CardRecord, EnrichedRecord, ManualRecord, Roster, ScanRecord, NO_PID};
use log::{debug, warn};
use std::io::Write;

pub const ATTENDING_HEADER: [&str; 2] = ["Name", "APID"];
pub const ATTENDING_ROSTER_HEADER: [&str; 4] = ["Name", "APID", "PID", "NET_ID"];
pub const ABSENT_HEADER: [&str; 3] = ["Name", "PID", "NET_ID"];

/// Collects attending rows in scan order. Whether a roster is present is
/// fixed when this is created and decides both reconciliation and the shape
/// of the output table.
pub struct Attendance {
    roster: Option<Roster>,
    include_excluded: bool,
    attending: Vec<AttendingRow>,
}

impl Attendance {
    pub fn new(roster: Option<Roster>, include_excluded: bool) -> Self {
        Self {
            roster,
            include_excluded,
            attending: Vec::new(),
        }
    }

    /// Parses one raw line and processes it. `line_number` is only used for
    /// diagnostics.
    pub fn process_line(&mut self, line_number: usize, line: &str) {
        let record = match ScanRecord::try_parse(line) {
            Ok(record) => record,
            Err(err) => {
                warn!("Line {}: {}; keeping it as a manual entry", line_number, err);
                ScanRecord::manual(line)
            }
        };

        self.process(record);
    }

    pub fn process(&mut self, record: ScanRecord) {
        match record {
            ScanRecord::Manual(manual) => self.attending.push(AttendingRow::Manual(manual)),
            ScanRecord::Card(card) => {
                if card.apid.is_excluded_variant() && !self.include_excluded {
                    debug!("Skipping excluded card id {}", card.apid);
                    return;
                }

                match &mut self.roster {
                    None => self.attending.push(AttendingRow::Card(card)),
                    Some(roster) => match roster.reconcile(&card) {
                        Some(enriched) => self.attending.push(AttendingRow::Enriched(enriched)),
                        None => debug!("Card id {} ({}) is not on the roster", card.apid, card.name),
                    },
                }
            }
        }
    }

    pub fn finish(self) -> Report {
        Report {
            attending: self.attending,
            roster: self.roster,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttendingRow {
    Card(CardRecord),
    Manual(ManualRecord),
    Enriched(EnrichedRecord),
}

impl AttendingRow {
    fn name(&self) -> &str {
        match self {
            Self::Card(card) => &card.name,
            Self::Manual(manual) => &manual.name,
            Self::Enriched(enriched) => &enriched.name,
        }
    }

    fn apid(&self) -> &str {
        match self {
            Self::Card(card) => &card.apid.0,
            Self::Manual(_) => NO_PID,
            Self::Enriched(enriched) => &enriched.card.apid.0,
        }
    }

    // Manual rows have neither, and are padded with blanks.
    fn pid_and_net_id(&self) -> (&str, &str) {
        match self {
            Self::Enriched(enriched) => (enriched.pid.0.as_str(), enriched.net_id.as_str()),
            _ => ("", ""),
        }
    }
}

/// The outcome of a run: attending rows in scan order, and the roster with
/// its presence flags when one was loaded.
pub struct Report {
    attending: Vec<AttendingRow>,
    roster: Option<Roster>,
}

impl Report {
    pub fn attending(&self) -> &[AttendingRow] {
        &self.attending
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    pub fn write_attending<Writer: Write>(&self, f: Writer) -> Result<(), csv::Error> {
        let mut writer = csv_writer(f);

        match self.roster {
            None => {
                writer.write_record(ATTENDING_HEADER)?;
                for row in &self.attending {
                    writer.write_record([row.name(), row.apid()])?;
                }
            }
            Some(_) => {
                writer.write_record(ATTENDING_ROSTER_HEADER)?;
                for row in &self.attending {
                    let (pid, net_id) = row.pid_and_net_id();
                    writer.write_record([row.name(), row.apid(), pid, net_id])?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes everyone on the roster who never showed up, in roster order.
    /// Returns `Ok(false)` without writing anything when there's no roster.
    pub fn write_absent<Writer: Write>(&self, f: Writer) -> Result<bool, csv::Error> {
        let roster = match &self.roster {
            Some(roster) => roster,
            None => return Ok(false),
        };

        let mut writer = csv_writer(f);
        writer.write_record(ABSENT_HEADER)?;

        for entry in roster.absent() {
            writer.write_record([entry.name.as_str(), entry.pid.0.as_str(), entry.net_id.as_str()])?;
        }

        writer.flush()?;
        Ok(true)
    }
}

fn csv_writer<Writer: Write>(f: Writer) -> csv::Writer<Writer> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(f)
}
