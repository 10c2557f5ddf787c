// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Returns the elements of `0..length` that are not in `indexes`, in ascending order.
pub fn get_remaining_indexes(length: usize, indexes: &[usize]) -> Vec<usize> {
    (0..length).filter(|i| !indexes.contains(i)).collect()
}

pub mod bbs_utils {
    use crate::bbs::ciphersuites::{BbsCiphersuite, HASH_LEN};
    use crate::bbs::keys::BBSPublicKey;
    use crate::errors::Error;
    use crate::utils::message::BBSMessage;
    use bls12_381_plus::{
        multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar,
    };
    use group::{Curve, Group};
    use ff::Field;
    use rand::RngCore;

    pub const SCALAR_BYTES: usize = 32;
    pub const G1_BYTES: usize = 48;
    pub const G2_BYTES: usize = 96;

    /// Integer to Octet Stream, big endian, `x_len` at most 8.
    pub fn i2osp(x: usize, x_len: usize) -> Vec<u8> {
        let bytes = (x as u64).to_be_bytes();
        bytes[bytes.len() - x_len.min(bytes.len())..].to_vec()
    }

    /// DST used for every hash-to-scalar call scoped by an API identifier.
    pub fn h2s_dst<CS: BbsCiphersuite>(api_id: &[u8]) -> Vec<u8> {
        [api_id, CS::H2S].concat()
    }

    /// # Description
    /// Hashes an octet string to a scalar: the digest of `msg_octets || dst`,
    /// read as a big endian integer and reduced modulo the group order `r`.
    ///
    /// # Inputs:
    /// * `msg_octets` (REQUIRED), an octet string.
    /// * `dst` (REQUIRED), the domain separation tag.
    ///
    /// # Output:
    /// a [`Scalar`].
    pub fn hash_to_scalar<CS: BbsCiphersuite>(msg_octets: &[u8], dst: &[u8]) -> Scalar {
        let digest = CS::hash(&[msg_octets, dst]);

        let mut wide = [0u8; 64];
        wide[..HASH_LEN].copy_from_slice(&digest);
        wide[..HASH_LEN].reverse();

        Scalar::from_bytes_wide(&wide)
    }

    /// # Description
    /// Binds the public key, the generators in use, the header and the API id into one scalar.
    /// Signer, holder and verifier must obtain the same value.
    ///
    /// # Inputs:
    /// * `pk` (REQUIRED), the signer public key.
    /// * `q1` (REQUIRED), the domain generator.
    /// * `h_points` (REQUIRED), the message generators actually used (`H_1..H_L`).
    /// * `header` (OPTIONAL), an octet string. Defaults to the empty string.
    /// * `api_id` (REQUIRED), an octet string.
    ///
    /// # Output:
    /// a [`Scalar`].
    pub fn calculate_domain<CS: BbsCiphersuite>(
        pk: &BBSPublicKey,
        q1: G1Projective,
        h_points: &[G1Projective],
        header: Option<&[u8]>,
        api_id: &[u8],
    ) -> Scalar {
        let header = header.unwrap_or(b"");

        let mut dom_input: Vec<u8> = Vec::with_capacity(
            G2_BYTES + G1_BYTES * (h_points.len() + 1) + 8 + header.len() + api_id.len(),
        );
        dom_input.extend_from_slice(&pk.to_bytes());
        dom_input.extend_from_slice(&g1_to_bytes(&q1));
        h_points
            .iter()
            .for_each(|p| dom_input.extend_from_slice(&g1_to_bytes(p)));
        dom_input.extend_from_slice(&i2osp(header.len(), 8));
        dom_input.extend_from_slice(header);
        dom_input.extend_from_slice(api_id);

        hash_to_scalar::<CS>(&dom_input, &h2s_dst::<CS>(api_id))
    }

    /// `B = P1 + Q_1 * domain + H_1 * msg_1 + ... + H_L * msg_L`
    pub(crate) fn calculate_b(
        q1: G1Projective,
        h_points: &[G1Projective],
        domain: Scalar,
        messages: &[BBSMessage],
    ) -> G1Projective {
        let mut B = G1Projective::GENERATOR + q1 * domain;
        for (h, m) in h_points.iter().zip(messages) {
            if !bool::from(m.value.is_zero()) {
                B += h * m.value;
            }
        }
        B
    }

    /// `e(a, w) * e(b, -P2) == Identity_GT`, evaluated with a single multi Miller loop.
    pub(crate) fn pairing_check(a: G1Projective, w: G2Projective, b: G1Projective) -> bool {
        let BP2 = G2Projective::GENERATOR;
        let term1 = (&a.to_affine(), &G2Prepared::from(w.to_affine()));
        let term2 = (&b.to_affine(), &G2Prepared::from(-BP2.to_affine()));

        multi_miller_loop(&[term1, term2]).final_exponentiation() == Gt::IDENTITY
    }

    pub trait ScalarExt: Sized {
        fn to_bytes_be(&self) -> [u8; SCALAR_BYTES];
        fn from_bytes_be(bytes: &[u8; SCALAR_BYTES]) -> Result<Self, Error>;
    }

    impl ScalarExt for Scalar {
        fn to_bytes_be(&self) -> [u8; SCALAR_BYTES] {
            self.to_be_bytes()
        }

        fn from_bytes_be(bytes: &[u8; SCALAR_BYTES]) -> Result<Self, Error> {
            Option::<Scalar>::from(Scalar::from_be_bytes(bytes)).ok_or_else(|| {
                Error::MalformedInputError("scalar is not in [0, r)".to_owned())
            })
        }
    }

    /// Reads a 32 bytes big endian scalar from the beginning of `bytes`.
    pub fn parse_scalar(bytes: &[u8]) -> Result<Scalar, Error> {
        let bytes: &[u8; SCALAR_BYTES] = bytes
            .get(..SCALAR_BYTES)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| Error::MalformedInputError("scalar must be 32 bytes".to_owned()))?;
        Scalar::from_bytes_be(bytes)
    }

    /// Compressed G1 encoding, with the identity mapped to 48 zero bytes.
    pub fn g1_to_bytes(p: &G1Projective) -> [u8; G1_BYTES] {
        if bool::from(p.is_identity()) {
            [0u8; G1_BYTES]
        } else {
            p.to_affine().to_compressed()
        }
    }

    pub fn parse_g1_projective(bytes: &[u8]) -> Result<G1Projective, Error> {
        let bytes: &[u8; G1_BYTES] = bytes
            .try_into()
            .map_err(|_| Error::MalformedInputError("G1 point must be 48 bytes".to_owned()))?;
        if bytes.iter().all(|&b| b == 0) {
            return Ok(G1Projective::IDENTITY);
        }
        Option::<G1Affine>::from(G1Affine::from_compressed(bytes))
            .map(G1Projective::from)
            .ok_or_else(|| Error::MalformedInputError("invalid G1 point".to_owned()))
    }

    /// Compressed G2 encoding, with the identity mapped to 96 zero bytes.
    pub fn g2_to_bytes(p: &G2Projective) -> [u8; G2_BYTES] {
        if bool::from(p.is_identity()) {
            [0u8; G2_BYTES]
        } else {
            p.to_affine().to_compressed()
        }
    }

    pub fn parse_g2_projective(bytes: &[u8]) -> Result<G2Projective, Error> {
        let bytes: &[u8; G2_BYTES] = bytes
            .try_into()
            .map_err(|_| Error::MalformedInputError("G2 point must be 96 bytes".to_owned()))?;
        if bytes.iter().all(|&b| b == 0) {
            return Ok(G2Projective::IDENTITY);
        }
        Option::<G2Affine>::from(G2Affine::from_compressed(bytes))
            .map(G2Projective::from)
            .ok_or_else(|| Error::MalformedInputError("invalid G2 point".to_owned()))
    }

    /// A uniformly random non-zero scalar.
    pub fn get_random() -> Scalar {
        let mut rng = rand::thread_rng();
        loop {
            let mut buf = [0u8; 48];
            rng.fill_bytes(&mut buf);
            let scalar = Scalar::from_okm(&buf);
            if !bool::from(scalar.is_zero()) {
                return scalar;
            }
        }
    }

    pub fn calculate_random_scalars(count: usize) -> Vec<Scalar> {
        (0..count).map(|_| get_random()).collect()
    }

    /// Deterministic stand-in for [`calculate_random_scalars`] used to reproduce proofs in tests.
    #[cfg(test)]
    pub(crate) fn seeded_random_scalars<CS: BbsCiphersuite>(count: usize, seed: &[u8]) -> Vec<Scalar> {
        let dst = [CS::ID, b"MOCK_RANDOM_SCALARS_DST_"].concat();
        (0..count)
            .map(|i| hash_to_scalar::<CS>(&[seed, &i2osp(i, 4)].concat(), &dst))
            .collect()
    }

    /// Picks `messages[i]` for each `i` in `indexes`.
    pub fn get_messages<T: Clone>(messages: &[T], indexes: &[usize]) -> Result<Vec<T>, Error> {
        indexes
            .iter()
            .map(|&i| {
                messages.get(i).cloned().ok_or_else(|| {
                    Error::MalformedInputError(format!(
                        "index {} out of range for {} messages",
                        i,
                        messages.len()
                    ))
                })
            })
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::bbs::ciphersuites::Bls12381Sha256;

        #[test]
        fn i2osp_is_big_endian() {
            assert_eq!(i2osp(1, 4), vec![0, 0, 0, 1]);
            assert_eq!(i2osp(258, 8), vec![0, 0, 0, 0, 0, 0, 1, 2]);
        }

        #[test]
        fn hash_to_scalar_reduces_the_digest() {
            let digest = Bls12381Sha256::hash(&[b"message", b"dst"]);
            let expected = hash_to_scalar::<Bls12381Sha256>(b"message", b"dst");
            let mut wide = [0u8; 64];
            wide[..32].copy_from_slice(&digest);
            wide[..32].reverse();
            assert_eq!(Scalar::from_bytes_wide(&wide), expected);
            assert_ne!(expected, hash_to_scalar::<Bls12381Sha256>(b"message", b"other"));
        }

        #[test]
        fn identity_points_encode_to_zeros() {
            assert_eq!(g1_to_bytes(&G1Projective::IDENTITY), [0u8; G1_BYTES]);
            assert_eq!(g2_to_bytes(&G2Projective::IDENTITY), [0u8; G2_BYTES]);
            assert_eq!(parse_g1_projective(&[0u8; G1_BYTES]).unwrap(), G1Projective::IDENTITY);
            assert_eq!(parse_g2_projective(&[0u8; G2_BYTES]).unwrap(), G2Projective::IDENTITY);
        }

        #[test]
        fn points_round_trip() {
            let p = G1Projective::GENERATOR * Scalar::from(7u64);
            assert_eq!(parse_g1_projective(&g1_to_bytes(&p)).unwrap(), p);
            let q = G2Projective::GENERATOR * Scalar::from(11u64);
            assert_eq!(parse_g2_projective(&g2_to_bytes(&q)).unwrap(), q);
        }

        #[test]
        fn malformed_points_are_rejected() {
            assert!(matches!(
                parse_g1_projective(&[1u8; 47]),
                Err(Error::MalformedInputError(_))
            ));
            assert!(matches!(
                parse_g1_projective(&[0xffu8; 48]),
                Err(Error::MalformedInputError(_))
            ));
            assert!(matches!(
                parse_g2_projective(&[0u8; 95]),
                Err(Error::MalformedInputError(_))
            ));
        }

        #[test]
        fn get_messages_checks_indexes() {
            let messages = ["a", "b", "c"];
            assert_eq!(get_messages(&messages, &[2, 0]).unwrap(), vec!["c", "a"]);
            assert!(get_messages(&messages, &[]).unwrap().is_empty());
            assert!(matches!(
                get_messages(&messages, &[1, 3]),
                Err(Error::MalformedInputError(_))
            ));
        }

        #[test]
        fn scalars_above_the_order_are_rejected() {
            assert!(Scalar::from_bytes_be(&[0xffu8; 32]).is_err());
            let s = Scalar::from(42u64);
            assert_eq!(Scalar::from_bytes_be(&s.to_bytes_be()).unwrap(), s);
        }

        #[test]
        fn random_scalars_are_fresh() {
            let r = calculate_random_scalars(3);
            assert_eq!(r.len(), 3);
            assert_ne!(r[0], r[1]);
            assert!(r.iter().all(|s| !bool::from(s.is_zero())));
        }
    }
}
