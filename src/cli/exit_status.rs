use std::process::ExitCode;

/// How a command ended, as seen by the calling shell or build script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The artifact was produced (or help was printed).
    Done,
    /// Nothing was done because it would clobber existing state.
    Refused,
    /// A step failed: download, build, file access or config.
    Aborted,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Done => 0,
            ExitStatus::Refused => 1,
            ExitStatus::Aborted => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
