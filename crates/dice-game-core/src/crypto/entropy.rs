//! Sources of secure random bytes.

use crate::error::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::VecDeque;

/// Trait for anything that can fill a buffer with secure random bytes
pub trait EntropySource {
    /// Fill `dest` completely or fail; never fall back to weaker randomness
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(dest)
    }
}

/// Operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::EntropyUnavailable(e.to_string()))
    }
}

/// Replays a fixed byte stream, for deterministic tests.
///
/// Fails with [`CryptoError::EntropyUnavailable`] once the stream runs dry,
/// which also makes it usable for exercising the unavailable-source path.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    bytes: VecDeque<u8>,
}

impl ScriptedEntropy {
    /// Create a source that yields `bytes` in order
    pub fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bytes: bytes.into_iter().collect(),
        }
    }

    /// Append more bytes to the end of the stream
    pub fn push(&mut self, bytes: impl IntoIterator<Item = u8>) {
        self.bytes.extend(bytes);
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        if self.bytes.len() < dest.len() {
            return Err(CryptoError::EntropyUnavailable(format!(
                "scripted entropy exhausted: wanted {} bytes, {} left",
                dest.len(),
                self.bytes.len()
            )));
        }
        let wanted = dest.len();
        for (slot, byte) in dest.iter_mut().zip(self.bytes.drain(..wanted)) {
            *slot = byte;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_entropy_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsEntropy.fill(&mut a).unwrap();
        OsEntropy.fill(&mut b).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_scripted_entropy_replays_in_order() {
        let mut source = ScriptedEntropy::new([1, 2, 3, 4]);
        let mut buf = [0u8; 3];
        source.fill(&mut buf).unwrap();

        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_scripted_entropy_exhaustion_is_an_error() {
        let mut source = ScriptedEntropy::new([9]);
        let mut buf = [0u8; 2];
        let err = source.fill(&mut buf).unwrap_err();

        assert!(matches!(err, CryptoError::EntropyUnavailable(_)));
        // A failed fill consumes nothing
        assert_eq!(source.remaining(), 1);
    }
}
