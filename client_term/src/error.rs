use thiserror::Error;

/// Failures of the terminal front-end
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}
