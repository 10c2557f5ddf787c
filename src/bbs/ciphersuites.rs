// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bls12_381_plus::G1Projective;
use digest::{ExtendableOutput, Update, XofReader};
use elliptic_curve::hash2curve::{ExpandMsgXmd, ExpandMsgXof};
use sha2::{Digest, Sha256};
use sha3::Shake256;

/// Output length of [`BbsCiphersuite::hash`].
pub const HASH_LEN: usize = 32;

/// A BBS ciphersuite: identifier, domain separation tags and the hash primitives
/// (plain hash and hash-to-G1) every operation is parameterized by.
pub trait BbsCiphersuite: Clone + core::fmt::Debug + Send + Sync + 'static {
    const ID: &'static [u8];
    const KEYGEN_DST: &'static [u8];
    const GENERATOR_DST: &'static [u8];
    const H2S: &'static [u8] = b"H2S_";
    /// Length of the random key material drawn when none is supplied.
    const IKM_LEN: usize = 32;

    /// Hash of the concatenation of `input`.
    fn hash(input: &[&[u8]]) -> [u8; HASH_LEN];

    /// hash_to_curve into G1 with the ciphersuite's expander.
    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> G1Projective;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bls12381Shake256 {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bls12381Sha256 {}

impl BbsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";
    const KEYGEN_DST: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_KEYGEN_DST_";
    const GENERATOR_DST: &'static [u8] =
        b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_MESSAGE_GENERATOR_DST_";

    fn hash(input: &[&[u8]]) -> [u8; HASH_LEN] {
        let mut hasher = Shake256::default();
        input.iter().for_each(|part| hasher.update(part));
        let mut out = [0u8; HASH_LEN];
        hasher.finalize_xof().read(&mut out);
        out
    }

    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> G1Projective {
        G1Projective::hash::<ExpandMsgXof<Shake256>>(msg, dst)
    }
}

impl BbsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_";
    const KEYGEN_DST: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_KEYGEN_DST_";
    const GENERATOR_DST: &'static [u8] =
        b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_MESSAGE_GENERATOR_DST_";

    fn hash(input: &[&[u8]]) -> [u8; HASH_LEN] {
        let mut hasher = Sha256::new();
        input.iter().for_each(|part| Digest::update(&mut hasher, part));
        hasher.finalize().into()
    }

    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> G1Projective {
        G1Projective::hash::<ExpandMsgXmd<Sha256>>(msg, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_concatenates_parts() {
        assert_eq!(
            Bls12381Sha256::hash(&[b"ab", b"cd"]),
            Bls12381Sha256::hash(&[b"abcd"])
        );
        assert_eq!(
            Bls12381Shake256::hash(&[b"a", b"bcd"]),
            Bls12381Shake256::hash(&[b"abcd"])
        );
    }

    #[test]
    fn sha256_matches_known_digest() {
        assert_eq!(
            hex::encode(Bls12381Sha256::hash(&[b"abc"])),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn ciphersuites_are_separated() {
        assert_ne!(
            Bls12381Sha256::hash_to_g1(b"seed", Bls12381Sha256::GENERATOR_DST),
            Bls12381Shake256::hash_to_g1(b"seed", Bls12381Shake256::GENERATOR_DST)
        );
    }
}
