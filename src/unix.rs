use crate::error::{IoctlError, Result};
use crate::types::IoctlArg;
use log::debug;
use std::ptr;

#[inline]
fn as_arg_ptr(buffer: &mut [u8]) -> *mut libc::c_void {
    if buffer.is_empty() {
        ptr::null_mut()
    } else {
        buffer.as_mut_ptr().cast::<libc::c_void>()
    }
}

/// Issues `ioctl(fd, request, arg)` and maps a negative return to the OS error.
///
/// # Safety
///
/// See [`crate::ioctl`].
pub unsafe fn ioctl(fd: i32, request: u32, arg: IoctlArg<'_>) -> Result<i32> {
    // The request parameter is c_ulong on glibc and Apple targets but c_int on musl.
    let rc = match arg {
        IoctlArg::Int(value) => unsafe { libc::ioctl(fd, request as _, value) },
        IoctlArg::Buffer(buffer) => unsafe { libc::ioctl(fd, request as _, as_arg_ptr(buffer)) },
    };

    if rc < 0 {
        let err = std::io::Error::last_os_error();
        debug!(
            "<memioctl> ioctl(fd={}, request={:#x}) failed [Err: {}]",
            fd, request, err
        );
        return Err(IoctlError::Os(err));
    }

    Ok(rc)
}
