use crate::error::{IoctlError, Result};
use crate::types::IoctlArg;

/// There is no ioctl outside Unix targets.
///
/// # Safety
///
/// Always safe to call; it never reaches the operating system.
pub unsafe fn ioctl(_fd: i32, request: u32, _arg: IoctlArg<'_>) -> Result<i32> {
    Err(IoctlError::NotSupported(format!(
        "<memioctl> ioctl request {:#x} requires a Unix target",
        request
    )))
}
