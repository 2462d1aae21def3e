use log::warn;
use std::{error::Error, path::PathBuf};

/// Everything a run needs, checked before any file is touched.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub attendance_output: Option<PathBuf>,
    pub include_excluded: bool,
    pub rosters: Vec<PathBuf>,
    pub absent_output: Option<PathBuf>,
}

impl Config {
    pub fn new(
        inputs: Vec<PathBuf>,
        attendance_output: Option<PathBuf>,
        include_excluded: bool,
        rosters: Vec<PathBuf>,
        mut absent_output: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }

        if absent_output.is_some() && rosters.is_empty() {
            return Err(ConfigError::AbsentWithoutRoster);
        }

        // Without --d2l nothing at all is written.
        if attendance_output.is_none() {
            if let Some(path) = absent_output.take() {
                warn!("Ignoring --absent {} since --d2l was not given", path.display());
            }
        }

        Ok(Self {
            inputs,
            attendance_output,
            include_excluded,
            rosters,
            absent_output,
        })
    }

    /// Roster mode is fixed for the whole run.
    pub fn has_roster(&self) -> bool {
        !self.rosters.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    NoInputs,
    AbsentWithoutRoster,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoInputs => write!(f, "No input files given"),
            Self::AbsentWithoutRoster => {
                write!(f, "--absent requires at least one --class-list")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use std::path::PathBuf;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_valid() {
        let config = Config::new(
            paths(&["scan.txt"]),
            Some("out.csv".into()),
            false,
            paths(&["class.csv"]),
            Some("absent.csv".into()),
        )
        .unwrap();

        assert!(config.has_roster());

        let config = Config::new(paths(&["a.txt", "b.xlsx"]), None, true, vec![], None).unwrap();

        assert!(!config.has_roster());
        assert!(config.include_excluded);
    }

    #[test]
    fn test_absent_without_roster() {
        assert_eq!(
            Config::new(
                paths(&["scan.txt"]),
                Some("out.csv".into()),
                false,
                vec![],
                Some("absent.csv".into()),
            ),
            Err(ConfigError::AbsentWithoutRoster)
        );
    }

    #[test]
    fn test_absent_needs_attendance_output() {
        let config = Config::new(
            paths(&["scan.txt"]),
            None,
            false,
            paths(&["class.csv"]),
            Some("absent.csv".into()),
        )
        .unwrap();

        assert_eq!(config.attendance_output, None);
        assert_eq!(config.absent_output, None);
        assert!(config.has_roster());
    }

    #[test]
    fn test_no_inputs() {
        assert_eq!(
            Config::new(vec![], None, false, vec![], None),
            Err(ConfigError::NoInputs)
        );
    }
}
