//! # memioctl
//!
//! Device control through `ioctl` and raw buffer addresses for native callers.
//!
//! This library provides two pieces that are used together when talking to a driver:
//! - An `ioctl` wrapper taking either an integer or a buffer argument
//! - The base address of a byte buffer, as bytes, in host order or normalized
//!   to a little-endian or big-endian consumer
//!
//! Ioctl argument structures often embed pointers to other buffers. The address
//! helpers produce those pointer bytes for either 32-bit or 64-bit hosts.
//!
//! ```rust,no_run
//! use memioctl::{ioctl, IoctlArg, MemAddressExt};
//!
//! let payload = vec![0_u8; 64];
//! let mut request = vec![0_u8; 32];
//!
//! let address = payload.mem_address_le()?;
//! request[..address.len()].copy_from_slice(address.as_bytes());
//!
//! # let fd = 3;
//! // The driver reads the embedded pointer from `request`.
//! let rc = unsafe { ioctl(fd, 0x4020_6b00, IoctlArg::Buffer(&mut request))? };
//! # let _ = rc;
//! # Ok::<(), memioctl::IoctlError>(())
//! ```

mod address;
mod error;
mod types;

#[cfg(unix)]
pub(crate) mod unix;
#[cfg(unix)]
use unix as platform;

#[cfg(not(unix))]
pub(crate) mod unsupported;
#[cfg(not(unix))]
use unsupported as platform;

// Error type
pub use error::{IoctlError, Result};
// Types
pub use types::{ByteOrder, IoctlArg, MemAddress};
// Address resolution
pub use address::{
    mem_address, mem_address_be, mem_address_hex, mem_address_le, swap_address,
    AddressExtractor, AddressNormalizer, MemAddressExt, NativeExtractor,
};

/// Issues a device-control request on `fd`.
///
/// Returns the non-negative value produced by the driver. A failed call is
/// reported as [`IoctlError::Os`] carrying the `errno` value; the request code
/// is passed through without interpretation.
///
/// # Safety
///
/// - `request` and `arg` must match what the driver behind `fd` expects
/// - With [`IoctlArg::Buffer`], the driver may read or write up to the size it
///   associates with `request`; the buffer must be at least that large
/// - Any pointers embedded in the buffer must stay valid for the duration of the call
pub unsafe fn ioctl(fd: i32, request: u32, arg: IoctlArg<'_>) -> Result<i32> {
    unsafe { platform::ioctl(fd, request, arg) }
}

/// Returns the byte order of the running host.
pub fn host_byte_order() -> ByteOrder {
    ByteOrder::host()
}
