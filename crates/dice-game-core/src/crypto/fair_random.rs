//! FairRandom: unbiased draws bound to a keyed-hash commitment.
//!
//! The computer draws a number, publishes `HMAC-SHA256(key, number)`, waits
//! for the counterpart's contribution, and only then discloses the key and
//! the number. Anyone holding the three values can recompute the hash.

use super::entropy::{EntropySource, OsEntropy};
use super::key::{CommitmentHash, SecretKey, KEY_LEN};
use crate::error::CryptoError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

/// A number the computer has committed to but not yet disclosed
#[derive(Clone, Debug)]
pub struct Committed {
    pub number: u64,
    pub key: SecretKey,
    pub hash: CommitmentHash,
}

impl Committed {
    /// Check the disclosed key and number against the published hash
    pub fn verify(&self) -> Result<bool, CryptoError> {
        verify(&self.key, self.number, &self.hash)
    }
}

/// Generator of secret keys and uniformly distributed numbers
#[derive(Debug, Default)]
pub struct FairRandom<E = OsEntropy> {
    source: E,
}

impl FairRandom<OsEntropy> {
    /// Create a generator backed by the operating system CSPRNG
    pub fn new() -> Self {
        Self { source: OsEntropy }
    }
}

impl<E: EntropySource> FairRandom<E> {
    /// Create a generator over a specific entropy source
    pub fn with_source(source: E) -> Self {
        Self { source }
    }

    /// Get the underlying entropy source
    pub fn source(&self) -> &E {
        &self.source
    }

    /// Generate a fresh 256-bit secret key
    pub fn generate_key(&mut self) -> Result<SecretKey, CryptoError> {
        let mut bytes = [0u8; KEY_LEN];
        self.source.fill(&mut bytes)?;
        Ok(SecretKey::from_bytes(bytes))
    }

    /// Draw a number uniformly from `0..=max`.
    ///
    /// Reads the fewest bytes covering `max`, masks them down to the bit
    /// length of `max`, and redraws any sample above `max`. The masked range
    /// is less than twice the target range, so the expected number of draws
    /// is at most two.
    pub fn uniform(&mut self, max: u64) -> Result<u64, CryptoError> {
        if max == 0 {
            return Ok(0);
        }

        let bits = u64::BITS - max.leading_zeros();
        let len = bits.div_ceil(8) as usize;
        let mask = if bits == u64::BITS {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        };

        loop {
            let mut buf = [0u8; 8];
            self.source.fill(&mut buf[8 - len..])?;
            let candidate = u64::from_be_bytes(buf) & mask;
            if candidate <= max {
                return Ok(candidate);
            }
            trace!(max, "rejected out-of-range sample");
        }
    }

    /// Generate a key, draw a number in `0..=max`, and commit to it
    pub fn bundle(&mut self, max: u64) -> Result<Committed, CryptoError> {
        let key = self.generate_key()?;
        let number = self.uniform(max)?;
        let hash = commit(&key, number)?;
        Ok(Committed { number, key, hash })
    }
}

/// Compute `HMAC-SHA256(key, decimal(number))`
pub fn commit(key: &SecretKey, number: u64) -> Result<CommitmentHash, CryptoError> {
    let mac = keyed_mac(key, number)?;
    Ok(CommitmentHash::from_bytes(mac.finalize().into_bytes().into()))
}

/// Recompute the commitment and compare it to `hash` in constant time
pub fn verify(key: &SecretKey, number: u64, hash: &CommitmentHash) -> Result<bool, CryptoError> {
    let mac = keyed_mac(key, number)?;
    Ok(mac.verify_slice(hash.as_bytes()).is_ok())
}

fn keyed_mac(key: &SecretKey, number: u64) -> Result<HmacSha256, CryptoError> {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::MalformedKey)?;
    mac.update(number.to_string().as_bytes());
    Ok(mac)
}
