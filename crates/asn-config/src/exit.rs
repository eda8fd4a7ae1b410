//! Process exit codes. Only the binary's `main` turns these into an exit;
//! library code returns ordinary errors.

use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    RunError,
    EnvFileError,
    ConfigError,
    LoggerError,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::RunError => 1,
            Exit::EnvFileError => 2,
            Exit::ConfigError => 3,
            Exit::LoggerError => 4,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}
