//! # Hashing Utilities
//!
//! Two hash functions, each with one job:
//!
//! - **SHA-256** produces the 32-byte content hash embedded in signature
//!   records. This is the value a third party recomputes to decide whether
//!   a document still matches its signature.
//! - **blake2b** backs the address checksum (512-bit output, truncated)
//!   and the compression of oversized derivation junctions (256-bit).
//!
//! Both are exposed as free functions over byte slices. No streaming
//! interface: documents are hashed as a single in-memory buffer, which is
//! how the signing engine receives them.

use blake2b_simd::Params as Blake2bParams;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// Returns a 32-byte digest as a `Vec<u8>`. For callers that want a
/// fixed-size array, use [`sha256_array`].
///
/// # Example
///
/// ```
/// use veridoc::crypto::sha256;
///
/// let hash = sha256(b"signed document bytes");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// Same digest as [`sha256`], without the heap allocation. This is the form
/// stored in [`SignaturePayload`](crate::signer::SignaturePayload).
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute a 64-byte blake2b-512 digest over several byte slices.
///
/// The parts are fed to the hasher in order, so the result equals hashing
/// their concatenation without allocating the joined buffer. The address
/// codec uses this for its checksum preimage (tag, prefix, key).
pub fn blake2b_512_multi(parts: &[&[u8]]) -> [u8; 64] {
    let mut state = Blake2bParams::new().hash_length(64).to_state();
    for part in parts {
        state.update(part);
    }
    let hash = state.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(hash.as_bytes());
    output
}

/// Compute a 32-byte blake2b-256 digest.
///
/// Used to compress derivation-path components whose encoding exceeds the
/// 32-byte chain code.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let hash = Blake2bParams::new().hash_length(32).to_state().update(data).finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(hash.as_bytes());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256 of the empty string, the canonical test vector.
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn sha256_array_matches_vec() {
        let vec_result = sha256(b"test data");
        let arr_result = sha256_array(b"test data");
        assert_eq!(vec_result.as_slice(), arr_result.as_slice());
    }

    #[test]
    fn sha256_deterministic() {
        assert_eq!(sha256(b"veridoc"), sha256(b"veridoc"));
        assert_ne!(sha256(b"veridoc"), sha256(b"Veridoc"));
    }

    #[test]
    fn blake2b_512_multi_equals_concatenation() {
        let multi = blake2b_512_multi(&[b"SS58PRE", b"payload"]);
        let single = blake2b_512_multi(&[b"SS58PREpayload"]);
        assert_eq!(multi, single);
    }

    #[test]
    fn blake2b_512_known_vector() {
        // blake2b-512 of "abc" from the BLAKE2 reference test vectors.
        let hash = blake2b_512_multi(&[b"abc"]);
        let expected = hex::decode(
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
             7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923",
        )
        .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn blake2b_256_differs_from_512_truncation() {
        // blake2b parameterizes the output length into the digest, so a
        // 256-bit digest is not a prefix of the 512-bit one.
        let short = blake2b_256(b"chain code input");
        let long = blake2b_512_multi(&[b"chain code input"]);
        assert_ne!(short.as_slice(), &long[..32]);
    }
}
