use once_cell::sync::Lazy;
use std::fmt;

/// Detected once; the host byte order cannot change while the process runs.
static HOST_BYTE_ORDER: Lazy<ByteOrder> = Lazy::new(|| {
    match 1_u16.to_ne_bytes()[0] {
        1 => ByteOrder::Little,
        _ => ByteOrder::Big,
    }
});

/// Byte order of a multi-byte value in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,

    /// Most-significant byte first.
    Big,
}

impl ByteOrder {
    /// Returns the byte order of the running host.
    pub fn host() -> Self {
        *HOST_BYTE_ORDER
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("LE"),
            ByteOrder::Big => f.write_str("BE"),
        }
    }
}

/// The address of a buffer as an ordered sequence of 4 or 8 bytes.
///
/// Whether the bytes are in host order or a normalized order depends on the
/// entry point that produced it. The value is owned by the caller and is
/// typically copied into an ioctl argument structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemAddress {
    bytes: Vec<u8>,
}

impl MemAddress {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the address bytes in their stored order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of address bytes, 4 on 32-bit hosts and 8 on 64-bit hosts.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the address holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the address and returns the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Renders the bytes as lowercase hex, two digits per byte, in stored order.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for MemAddress {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<MemAddress> for Vec<u8> {
    fn from(address: MemAddress) -> Vec<u8> {
        address.bytes
    }
}

/// Third argument of an ioctl call.
#[derive(Debug)]
pub enum IoctlArg<'a> {
    /// An integer passed by value.
    Int(i32),

    /// A buffer passed by its base pointer. The driver may read and write it.
    Buffer(&'a mut [u8]),
}

impl From<i32> for IoctlArg<'_> {
    fn from(value: i32) -> Self {
        IoctlArg::Int(value)
    }
}

impl<'a> From<&'a mut [u8]> for IoctlArg<'a> {
    fn from(buffer: &'a mut [u8]) -> Self {
        IoctlArg::Buffer(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_order_matches_target() {
        let expected = if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        };
        assert_eq!(ByteOrder::host(), expected);
    }

    #[test]
    fn test_mem_address_hex() {
        let address = MemAddress::new(vec![0x00, 0x1f, 0xa0, 0xff]);
        assert_eq!(address.to_hex(), "001fa0ff");
        assert_eq!(address.len(), 4);
        assert!(!address.is_empty());
        assert_eq!(Vec::from(address), vec![0x00, 0x1f, 0xa0, 0xff]);
    }

    #[test]
    fn test_ioctl_arg_from() {
        assert!(matches!(IoctlArg::from(7), IoctlArg::Int(7)));

        let mut data = [0_u8; 4];
        match IoctlArg::from(&mut data[..]) {
            IoctlArg::Buffer(buf) => assert_eq!(buf.len(), 4),
            IoctlArg::Int(_) => panic!("expected a buffer argument"),
        }
    }
}
