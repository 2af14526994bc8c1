use thiserror::Error;

/// Errors that can occur while resolving buffer addresses or issuing an ioctl.
#[derive(Error, Debug)]
pub enum IoctlError {
    /// The buffer is not backed by addressable memory.
    ///
    /// Raised by an [`AddressExtractor`](crate::AddressExtractor) when it is handed
    /// a buffer it cannot take the address of, such as an empty slice whose
    /// pointer is dangling.
    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    /// The extracted address has a length other than 4 or 8 bytes.
    ///
    /// Carries the offending length. Only 32-bit and 64-bit pointer widths
    /// can be byte-swapped.
    #[error("Unexpected memory address size: {0} bytes")]
    UnsupportedAddressSize(usize),

    /// The ioctl call itself failed.
    ///
    /// Wraps the OS error reported through `errno`.
    #[error("<memioctl> ioctl failed [Err: {0}]")]
    Os(#[source] std::io::Error),

    /// The requested operation is not supported on this platform.
    #[error("Operation not supported on this platform: {0}")]
    NotSupported(String),
}

impl IoctlError {
    /// Returns the raw OS error code if this error came from the ioctl syscall.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            IoctlError::Os(err) => err.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for memioctl operations.
pub type Result<T> = std::result::Result<T, IoctlError>;
