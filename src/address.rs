use crate::error::{IoctlError, Result};
use crate::types::{ByteOrder, MemAddress};
use log::trace;
use std::mem;

/// Source of raw buffer addresses.
///
/// Implementations return the base address of `buffer` as 4 or 8 bytes in
/// host byte order, or fail with [`IoctlError::InvalidBuffer`].
pub trait AddressExtractor {
    /// Returns the base address of `buffer` in host byte order.
    fn extract(&self, buffer: &[u8]) -> Result<Vec<u8>>;
}

/// Extracts the address a slice actually points at.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeExtractor;

impl AddressExtractor for NativeExtractor {
    fn extract(&self, buffer: &[u8]) -> Result<Vec<u8>> {
        buffer_address(buffer).map(|address| address.to_ne_bytes().to_vec())
    }
}

// An empty slice carries a dangling pointer that no allocation backs.
fn buffer_address(buffer: &[u8]) -> Result<usize> {
    if buffer.is_empty() {
        return Err(IoctlError::InvalidBuffer(
            "<memioctl> buffer is empty and has no backing memory".to_string(),
        ));
    }
    Ok(buffer.as_ptr() as usize)
}

/// Permutes a 4- or 8-byte address into the opposite byte order.
///
/// The bytes are taken two at a time from the tail, so
/// `[0, 1, 2, 3, 4, 5, 6, 7]` becomes `[6, 7, 4, 5, 2, 3, 0, 1]` and
/// `[0, 1, 2, 3]` becomes `[2, 3, 0, 1]`. Existing consumers depend on this
/// exact layout; it is not a full reversal.
///
/// # Errors
///
/// Returns [`IoctlError::UnsupportedAddressSize`] for any other length.
pub fn swap_address(bytes: &[u8]) -> Result<Vec<u8>> {
    match bytes.len() {
        4 | 8 => Ok(bytes.chunks_exact(2).rev().flatten().copied().collect()),
        len => Err(IoctlError::UnsupportedAddressSize(len)),
    }
}

/// Resolves buffer addresses and normalizes them to a requested byte order.
///
/// The host byte order is fixed when the normalizer is built. [`Default`]
/// uses the real buffer address and the detected host order; tests and
/// callers emulating another host use [`AddressNormalizer::with_extractor`].
///
/// # Examples
///
/// ```rust
/// use memioctl::{AddressNormalizer, ByteOrder};
///
/// let normalizer: AddressNormalizer = AddressNormalizer::default();
/// let buffer = vec![0_u8; 16];
///
/// let le = normalizer.little_endian(&buffer).unwrap();
/// let be = normalizer.big_endian(&buffer).unwrap();
/// assert_eq!(le.len(), be.len());
/// assert_eq!(normalizer.host_order(), ByteOrder::host());
/// ```
#[derive(Debug, Clone)]
pub struct AddressNormalizer<E = NativeExtractor> {
    extractor: E,
    host_order: ByteOrder,
}

impl Default for AddressNormalizer<NativeExtractor> {
    fn default() -> Self {
        Self::with_extractor(NativeExtractor, ByteOrder::host())
    }
}

impl<E: AddressExtractor> AddressNormalizer<E> {
    /// Builds a normalizer over `extractor`, treating `host_order` as the
    /// byte order of the addresses it produces.
    pub fn with_extractor(extractor: E, host_order: ByteOrder) -> Self {
        Self {
            extractor,
            host_order,
        }
    }

    /// The host byte order this normalizer was built with.
    pub fn host_order(&self) -> ByteOrder {
        self.host_order
    }

    /// Returns the buffer address exactly as the extractor produced it.
    pub fn native(&self, buffer: &[u8]) -> Result<MemAddress> {
        self.extractor.extract(buffer).map(MemAddress::new)
    }

    /// Returns the buffer address for a little-endian consumer.
    pub fn little_endian(&self, buffer: &[u8]) -> Result<MemAddress> {
        self.in_order(buffer, ByteOrder::Little)
    }

    /// Returns the buffer address for a big-endian consumer.
    pub fn big_endian(&self, buffer: &[u8]) -> Result<MemAddress> {
        self.in_order(buffer, ByteOrder::Big)
    }

    /// Returns the buffer address in `order`.
    ///
    /// The extracted bytes are returned untouched when `order` is the host
    /// order and passed through [`swap_address`] otherwise.
    pub fn in_order(&self, buffer: &[u8], order: ByteOrder) -> Result<MemAddress> {
        let raw = self.extractor.extract(buffer)?;
        if order == self.host_order {
            trace!("{}-byte address already in {} order", raw.len(), order);
            return Ok(MemAddress::new(raw));
        }

        trace!(
            "swapping {}-byte address from {} to {}",
            raw.len(),
            self.host_order,
            order
        );
        swap_address(&raw).map(MemAddress::new)
    }
}

fn default_normalizer() -> AddressNormalizer {
    AddressNormalizer::default()
}

/// Returns the address of `buffer` in host byte order.
pub fn mem_address(buffer: &[u8]) -> Result<MemAddress> {
    default_normalizer().native(buffer)
}

/// Returns the address of `buffer` for a little-endian consumer.
pub fn mem_address_le(buffer: &[u8]) -> Result<MemAddress> {
    default_normalizer().little_endian(buffer)
}

/// Returns the address of `buffer` for a big-endian consumer.
pub fn mem_address_be(buffer: &[u8]) -> Result<MemAddress> {
    default_normalizer().big_endian(buffer)
}

/// Returns the address of `buffer` as zero-padded lowercase hex.
///
/// The width is two digits per pointer byte: 16 on 64-bit hosts and 8 on
/// 32-bit hosts.
pub fn mem_address_hex(buffer: &[u8]) -> Result<String> {
    let address = buffer_address(buffer)?;
    Ok(format!(
        "{:0width$x}",
        address,
        width = 2 * mem::size_of::<usize>()
    ))
}

/// Address helpers available directly on byte buffers.
///
/// ```rust
/// use memioctl::MemAddressExt;
///
/// let buffer = vec![1_u8, 2, 3];
/// let address = buffer.mem_address().unwrap();
/// assert_eq!(address.len(), std::mem::size_of::<usize>());
/// ```
pub trait MemAddressExt {
    /// See [`mem_address`].
    fn mem_address(&self) -> Result<MemAddress>;

    /// See [`mem_address_le`].
    fn mem_address_le(&self) -> Result<MemAddress>;

    /// See [`mem_address_be`].
    fn mem_address_be(&self) -> Result<MemAddress>;
}

impl MemAddressExt for [u8] {
    fn mem_address(&self) -> Result<MemAddress> {
        mem_address(self)
    }

    fn mem_address_le(&self) -> Result<MemAddress> {
        mem_address_le(self)
    }

    fn mem_address_be(&self) -> Result<MemAddress> {
        mem_address_be(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor(Vec<u8>);

    impl AddressExtractor for FixedExtractor {
        fn extract(&self, _buffer: &[u8]) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    const ADDR64: [u8; 8] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
    const ADDR32: [u8; 4] = [0xaa, 0xbb, 0xcc, 0xdd];

    #[test]
    fn test_swap_known_vectors() {
        assert_eq!(
            swap_address(&ADDR64).expect("8-byte swap failed"),
            vec![0x66, 0x77, 0x44, 0x55, 0x22, 0x33, 0x00, 0x11]
        );
        assert_eq!(
            swap_address(&ADDR32).expect("4-byte swap failed"),
            vec![0xcc, 0xdd, 0xaa, 0xbb]
        );
    }

    #[test]
    fn test_swap_is_not_a_full_reversal() {
        let swapped = swap_address(&ADDR64).expect("8-byte swap failed");
        let reversed: Vec<u8> = ADDR64.iter().rev().copied().collect();
        assert_ne!(swapped, reversed);
    }

    #[test]
    fn test_swap_twice_is_identity() {
        for input in [&ADDR64[..], &ADDR32[..], &[0xff, 0, 0, 1][..]] {
            let once = swap_address(input).expect("first swap failed");
            let twice = swap_address(&once).expect("second swap failed");
            assert_eq!(twice, input);
        }
    }

    #[test]
    fn test_swap_does_not_touch_input() {
        let input = ADDR64;
        let _ = swap_address(&input).expect("8-byte swap failed");
        assert_eq!(input, ADDR64);
    }

    #[test]
    fn test_swap_rejects_other_sizes() {
        for len in [0_usize, 1, 2, 3, 5, 6, 7, 9, 16] {
            let input = vec![0_u8; len];
            match swap_address(&input) {
                Err(IoctlError::UnsupportedAddressSize(got)) => assert_eq!(got, len),
                other => panic!("expected UnsupportedAddressSize for {} bytes, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_little_endian_host() {
        let normalizer =
            AddressNormalizer::with_extractor(FixedExtractor(ADDR64.to_vec()), ByteOrder::Little);
        let buffer = [0_u8; 1];

        let native = normalizer.native(&buffer).expect("native failed");
        let le = normalizer.little_endian(&buffer).expect("little_endian failed");
        let be = normalizer.big_endian(&buffer).expect("big_endian failed");

        assert_eq!(native.as_bytes(), ADDR64);
        assert_eq!(le, native);
        assert_eq!(be.as_bytes(), [0x66, 0x77, 0x44, 0x55, 0x22, 0x33, 0x00, 0x11]);
    }

    #[test]
    fn test_big_endian_host() {
        let normalizer =
            AddressNormalizer::with_extractor(FixedExtractor(ADDR32.to_vec()), ByteOrder::Big);
        let buffer = [0_u8; 1];

        let native = normalizer.native(&buffer).expect("native failed");
        let le = normalizer.little_endian(&buffer).expect("little_endian failed");
        let be = normalizer.big_endian(&buffer).expect("big_endian failed");

        assert_eq!(be, native);
        assert_eq!(le.as_bytes(), [0xcc, 0xdd, 0xaa, 0xbb]);
        assert_eq!(normalizer.host_order(), ByteOrder::Big);
    }

    #[test]
    fn test_in_order_matches_named_entry_points() {
        let normalizer =
            AddressNormalizer::with_extractor(FixedExtractor(ADDR64.to_vec()), ByteOrder::Little);
        let buffer = [0_u8; 1];

        assert_eq!(
            normalizer.in_order(&buffer, ByteOrder::Big).expect("in_order failed"),
            normalizer.big_endian(&buffer).expect("big_endian failed")
        );
        assert_eq!(
            normalizer.in_order(&buffer, ByteOrder::Little).expect("in_order failed"),
            normalizer.little_endian(&buffer).expect("little_endian failed")
        );
    }

    #[test]
    fn test_unsupported_size_only_when_swapping() {
        let normalizer =
            AddressNormalizer::with_extractor(FixedExtractor(vec![1, 2, 3, 4, 5]), ByteOrder::Little);
        let buffer = [0_u8; 1];

        // Matching order hands the extractor's bytes straight back.
        assert_eq!(
            normalizer.little_endian(&buffer).expect("little_endian failed").len(),
            5
        );
        assert!(matches!(
            normalizer.big_endian(&buffer),
            Err(IoctlError::UnsupportedAddressSize(5))
        ));
    }

    #[test]
    fn test_native_extractor_width() {
        let buffer = [0_u8; 3];
        let raw = NativeExtractor.extract(&buffer).expect("extract failed");
        assert_eq!(raw.len(), mem::size_of::<usize>());
    }

    #[test]
    fn test_native_extractor_rejects_empty() {
        let empty: [u8; 0] = [];
        assert!(matches!(
            NativeExtractor.extract(&empty),
            Err(IoctlError::InvalidBuffer(_))
        ));
    }
}
