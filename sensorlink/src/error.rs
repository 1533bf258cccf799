use core::result::Result as CoreResult;
use thiserror::Error;

pub type Result<T> = CoreResult<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Baud rate is not in range of accepted values: 9600, 19200, 38400, 57600, 115200")]
    InvalidBaudRate,
    #[error("Line does not fit the reading grammar: {0:?}")]
    InvalidLine(String),
    #[error("Expected at least 3 fields, got {0}")]
    ShortFrame(usize),
    #[error("Line exceeded {0} bytes without a CR-LF terminator")]
    LineTooLong(usize),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}
