//! Fixed response strings
//!
//! Every command answers with one of these, except `status` which builds a
//! multi-line report (see `fbsmc-core`).

use crate::command::ArgError;

/// Board identity returned by `version`
pub const VERSION: &str = "FBSMC01_A001";

/// Single-line command responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    Version,
    Ok,
    Invalid,
    BufferFull,
    InvalidDeviceId,
    InvalidSteps,
    InvalidSpeed,
}

impl Response {
    /// Wire text of this response
    pub const fn as_str(self) -> &'static str {
        match self {
            Response::Version => VERSION,
            Response::Ok => "OK",
            Response::Invalid => "INVALID",
            Response::BufferFull => "BUFFER FULL",
            Response::InvalidDeviceId => "INVALID DEVICE ID",
            Response::InvalidSteps => "INVALID STEPS VALUE",
            Response::InvalidSpeed => "INVALID SPEED VALUE",
        }
    }
}

impl From<ArgError> for Response {
    fn from(e: ArgError) -> Self {
        match e {
            ArgError::InvalidDeviceId => Response::InvalidDeviceId,
            ArgError::InvalidSteps => Response::InvalidSteps,
            ArgError::InvalidSpeed => Response::InvalidSpeed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_error_mapping() {
        assert_eq!(
            Response::from(ArgError::InvalidDeviceId).as_str(),
            "INVALID DEVICE ID"
        );
        assert_eq!(
            Response::from(ArgError::InvalidSteps).as_str(),
            "INVALID STEPS VALUE"
        );
        assert_eq!(
            Response::from(ArgError::InvalidSpeed).as_str(),
            "INVALID SPEED VALUE"
        );
    }
}
