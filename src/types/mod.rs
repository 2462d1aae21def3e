mod id;
mod roster;
mod scan;

pub use id::{Apid, Pid};
pub use roster::{EnrichedRecord, Roster, RosterEntry, RosterFields, ROSTER_COLUMNS};
pub use scan::{CardRecord, ManualRecord, ScanRecord, NO_PID};
