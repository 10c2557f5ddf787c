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

use super::{
    ciphersuites::BbsCiphersuite,
    generators::Generators,
    keys::BBSPublicKey,
    signature::BBSSignature,
};
use crate::{
    errors::Error,
    utils::{
        message::BBSMessage,
        util::{
            bbs_utils::{
                calculate_b, calculate_domain, calculate_random_scalars, g1_to_bytes,
                get_messages, h2s_dst, hash_to_scalar, i2osp, pairing_check,
                parse_g1_projective, parse_scalar, ScalarExt, G1_BYTES, SCALAR_BYTES,
            },
            get_remaining_indexes,
        },
    },
};
use bls12_381_plus::{G1Projective, Scalar};
use group::Group;
use serde::{Deserialize, Serialize};

/// Zero-knowledge proof of knowledge of a [`BBSSignature`], revealing only the disclosed messages.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSProof {
    pub Abar: G1Projective,
    pub Bbar: G1Projective,
    pub D: G1Projective,
    pub e_hat: Scalar,
    pub r1_hat: Scalar,
    pub r3_hat: Scalar,
    /// One response per undisclosed message, in ascending index order.
    pub commitments: Vec<Scalar>,
    pub challenge: Scalar,
}

impl BBSProof {
    const FIXED_BYTES: usize = 3 * G1_BYTES + 3 * SCALAR_BYTES + 4 + SCALAR_BYTES;

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> =
            Vec::with_capacity(Self::FIXED_BYTES + SCALAR_BYTES * self.commitments.len());

        bytes.extend_from_slice(&g1_to_bytes(&self.Abar));
        bytes.extend_from_slice(&g1_to_bytes(&self.Bbar));
        bytes.extend_from_slice(&g1_to_bytes(&self.D));
        bytes.extend_from_slice(&self.e_hat.to_bytes_be());
        bytes.extend_from_slice(&self.r1_hat.to_bytes_be());
        bytes.extend_from_slice(&self.r3_hat.to_bytes_be());
        bytes.extend_from_slice(&i2osp(self.commitments.len(), 4));
        self.commitments
            .iter()
            .for_each(|v| bytes.extend_from_slice(&v.to_bytes_be()));
        bytes.extend_from_slice(&self.challenge.to_bytes_be());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < Self::FIXED_BYTES {
            return Err(Error::MalformedInputError("proof is too short".to_owned()));
        }

        let parse_point = |slice: &[u8], name: &str| -> Result<G1Projective, Error> {
            let point = parse_g1_projective(slice)?;
            if bool::from(point.is_identity()) {
                return Err(Error::MalformedInputError(format!("{} == Identity_G1", name)));
            }
            Ok(point)
        };

        let Abar = parse_point(&bytes[0..48], "Abar")?;
        let Bbar = parse_point(&bytes[48..96], "Bbar")?;
        let D = parse_point(&bytes[96..144], "D")?;
        let e_hat = parse_scalar(&bytes[144..176])?;
        let r1_hat = parse_scalar(&bytes[176..208])?;
        let r3_hat = parse_scalar(&bytes[208..240])?;

        let mut count_bytes = [0u8; 4];
        count_bytes.copy_from_slice(&bytes[240..244]);
        let U = u32::from_be_bytes(count_bytes) as usize;

        let expected_len = U
            .checked_mul(SCALAR_BYTES)
            .and_then(|n| n.checked_add(Self::FIXED_BYTES));
        if expected_len != Some(bytes.len()) {
            return Err(Error::MalformedInputError(format!(
                "proof with {} commitments has the wrong length",
                U
            )));
        }

        let commitments_end = 244 + U * SCALAR_BYTES;
        let commitments = bytes[244..commitments_end]
            .chunks(SCALAR_BYTES)
            .map(parse_scalar)
            .collect::<Result<Vec<Scalar>, Error>>()?;
        let challenge = parse_scalar(&bytes[commitments_end..])?;

        Ok(Self {
            Abar,
            Bbar,
            D,
            e_hat,
            r1_hat,
            r3_hat,
            commitments,
            challenge,
        })
    }

    /// # Description
    /// Used by the holder to prove possession of a signature while revealing only the messages at
    /// `disclosed_indexes`. Every call yields a fresh, unlinkable proof.
    ///
    /// # Inputs:
    /// * `pk` (REQUIRED), the signer public key.
    /// * `signature` (REQUIRED), the signature over `messages`.
    /// * `generators` (REQUIRED), the generators the signature was produced with.
    /// * `header` (OPTIONAL), the header the signature was bound to.
    /// * `ph` (OPTIONAL), the presentation header, bound to the proof only.
    /// * `messages` (REQUIRED), all the signed messages.
    /// * `disclosed_indexes` (REQUIRED), 0-based indexes of the messages to reveal. Duplicates are ignored.
    ///
    /// # Output:
    /// a [`BBSProof`], [`Error::ProofGenError`] on an out of range index, or [`Error::TooManyMessagesError`].
    pub fn generate<CS, M>(
        pk: &BBSPublicKey,
        signature: &BBSSignature,
        generators: &Generators<CS>,
        header: Option<&[u8]>,
        ph: Option<&[u8]>,
        messages: &[M],
        disclosed_indexes: &[usize],
    ) -> Result<Self, Error>
    where
        CS: BbsCiphersuite,
        M: AsRef<[u8]>,
    {
        let message_scalars = BBSMessage::messages_to_scalar::<CS, M>(messages, generators.api_id());
        let L = message_scalars.len();

        let mut disclosed_indexes = disclosed_indexes.to_vec();
        disclosed_indexes.sort_unstable();
        disclosed_indexes.dedup();
        if let Some(&bad) = disclosed_indexes.iter().find(|&&i| i >= L) {
            return Err(Error::ProofGenError(format!(
                "disclosed index {} out of range for {} messages",
                bad, L
            )));
        }

        let U = L - disclosed_indexes.len();
        let random_scalars = calculate_random_scalars(5 + U);

        core_proof_gen(
            pk,
            signature,
            generators,
            header,
            ph,
            &message_scalars,
            &disclosed_indexes,
            &random_scalars,
        )
    }

    /// # Description
    /// Used by the verifier to check a proof against the disclosed messages.
    ///
    /// # Inputs:
    /// * `pk` (REQUIRED), the signer public key.
    /// * `generators` (REQUIRED), the generators the signature was produced with.
    /// * `header` (OPTIONAL), the signature header.
    /// * `ph` (OPTIONAL), the presentation header.
    /// * `disclosed_messages` (REQUIRED), the revealed messages, one per entry of `disclosed_indexes`.
    /// * `disclosed_indexes` (REQUIRED), the 0-based indexes of the revealed messages, in any order.
    ///
    /// # Output:
    /// `true` if valid. Malformed disclosure data (length mismatch, duplicate or out of range
    /// indexes, more messages than `generators` supports) yields `false`.
    pub fn verify<CS, M>(
        &self,
        pk: &BBSPublicKey,
        generators: &Generators<CS>,
        header: Option<&[u8]>,
        ph: Option<&[u8]>,
        disclosed_messages: &[M],
        disclosed_indexes: &[usize],
    ) -> bool
    where
        CS: BbsCiphersuite,
        M: AsRef<[u8]>,
    {
        if disclosed_messages.len() != disclosed_indexes.len() {
            return false;
        }
        let disclosed_scalars =
            BBSMessage::messages_to_scalar::<CS, M>(disclosed_messages, generators.api_id());

        let mut pairs: Vec<(usize, BBSMessage)> = disclosed_indexes
            .iter()
            .copied()
            .zip(disclosed_scalars)
            .collect();
        pairs.sort_by_key(|(i, _)| *i);
        if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
            return false;
        }
        let (indexes, messages): (Vec<usize>, Vec<BBSMessage>) = pairs.into_iter().unzip();

        core_proof_verify(pk, self, generators, header, ph, &messages, &indexes)
    }
}

/// Intermediate values shared by proof generation and verification.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProofInitResult {
    pub Abar: G1Projective,
    pub Bbar: G1Projective,
    pub D: G1Projective,
    pub T1: G1Projective,
    pub T2: G1Projective,
    pub domain: Scalar,
}

#[allow(clippy::too_many_arguments)]
fn core_proof_gen<CS: BbsCiphersuite>(
    pk: &BBSPublicKey,
    signature: &BBSSignature,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
    ph: Option<&[u8]>,
    messages: &[BBSMessage],
    disclosed_indexes: &[usize],
    random_scalars: &[Scalar],
) -> Result<BBSProof, Error> {
    let undisclosed_indexes = get_remaining_indexes(messages.len(), disclosed_indexes);

    let init_res = proof_init(
        pk,
        signature,
        generators,
        random_scalars,
        header,
        messages,
        &undisclosed_indexes,
    )?;

    let disclosed_messages = get_messages(messages, disclosed_indexes)?;
    let challenge = proof_challenge_calculate::<CS>(
        &init_res,
        &disclosed_messages,
        disclosed_indexes,
        ph,
        generators.api_id(),
    )?;

    let undisclosed_messages = get_messages(messages, &undisclosed_indexes)?;
    let proof = proof_finalize(
        &init_res,
        challenge,
        signature.e,
        random_scalars,
        &undisclosed_messages,
    )?;

    log::debug!(
        "generated proof disclosing {} of {} messages",
        disclosed_indexes.len(),
        messages.len()
    );
    Ok(proof)
}

/// `disclosed_indexes` must be sorted and free of duplicates, with `disclosed_messages` in the same order.
fn core_proof_verify<CS: BbsCiphersuite>(
    pk: &BBSPublicKey,
    proof: &BBSProof,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
    ph: Option<&[u8]>,
    disclosed_messages: &[BBSMessage],
    disclosed_indexes: &[usize],
) -> bool {
    if [proof.Abar, proof.Bbar, proof.D]
        .iter()
        .any(|p| bool::from(p.is_identity()))
    {
        log::debug!("proof carries an identity point");
        return false;
    }

    let init_res = match proof_verify_init(pk, proof, generators, header, disclosed_messages, disclosed_indexes) {
        Ok(init_res) => init_res,
        Err(_) => return false,
    };

    let challenge = match proof_challenge_calculate::<CS>(
        &init_res,
        disclosed_messages,
        disclosed_indexes,
        ph,
        generators.api_id(),
    ) {
        Ok(challenge) => challenge,
        Err(_) => return false,
    };

    if challenge != proof.challenge {
        return false;
    }

    // e(Abar, W) * e(Bbar, -P2) == Identity_GT
    pairing_check(proof.Abar, pk.0, proof.Bbar)
}

/// # Description
/// First step of proof generation: randomizes the signature and computes the Schnorr commitments `T1`, `T2`.
///
/// # Inputs:
/// * `random_scalars` (REQUIRED), `5 + U` scalars: `r1, r2, e~, r1~, r3~, m~_1, ..., m~_U`.
/// * `messages` (REQUIRED), all the signed messages as scalars.
/// * `undisclosed_indexes` (REQUIRED), ascending indexes of the hidden messages.
///
/// # Output:
/// a [`ProofInitResult`] or [`Error`].
pub fn proof_init<CS: BbsCiphersuite>(
    pk: &BBSPublicKey,
    signature: &BBSSignature,
    generators: &Generators<CS>,
    random_scalars: &[Scalar],
    header: Option<&[u8]>,
    messages: &[BBSMessage],
    undisclosed_indexes: &[usize],
) -> Result<ProofInitResult, Error> {
    let L = messages.len();
    let U = undisclosed_indexes.len();

    if random_scalars.len() != 5 + U {
        return Err(Error::ProofGenError(format!(
            "expected {} random scalars, got {}",
            5 + U,
            random_scalars.len()
        )));
    }
    if undisclosed_indexes.iter().any(|&j| j >= L) {
        return Err(Error::ProofGenError("undisclosed index out of range".to_owned()));
    }

    let H_points = generators.h_points(L)?;
    let Q1 = generators.q1();
    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, generators.api_id());

    let B = calculate_b(Q1, H_points, domain, messages);

    let r1 = random_scalars[0];
    let r2 = random_scalars[1];
    let e_tilde = random_scalars[2];
    let r1_tilde = random_scalars[3];
    let r3_tilde = random_scalars[4];
    let m_tilde = &random_scalars[5..];

    let D = B * r2;
    let Abar = signature.a * (r1 * r2);
    let Bbar = D * r1 - Abar * signature.e;

    let T1 = Abar * e_tilde + D * r1_tilde;
    let mut T2 = D * r3_tilde;
    for (&j, m) in undisclosed_indexes.iter().zip(m_tilde) {
        T2 += H_points[j] * m;
    }

    Ok(ProofInitResult {
        Abar,
        Bbar,
        D,
        T1,
        T2,
        domain,
    })
}

/// # Description
/// Computes the Fiat-Shamir challenge. Disclosed `(index, message)` pairs are hashed in
/// ascending index order whatever order they are supplied in.
///
/// # Output:
/// the challenge [`Scalar`], or [`Error::MalformedInputError`] if messages and indexes differ in number.
pub fn proof_challenge_calculate<CS: BbsCiphersuite>(
    init_res: &ProofInitResult,
    disclosed_messages: &[BBSMessage],
    disclosed_indexes: &[usize],
    ph: Option<&[u8]>,
    api_id: &[u8],
) -> Result<Scalar, Error> {
    let R = disclosed_indexes.len();
    if disclosed_messages.len() != R {
        return Err(Error::MalformedInputError(
            "number of disclosed indexes different from number of disclosed messages".to_owned(),
        ));
    }
    let ph = ph.unwrap_or(b"");

    let mut pairs: Vec<(usize, &BBSMessage)> =
        disclosed_indexes.iter().copied().zip(disclosed_messages).collect();
    pairs.sort_by_key(|(i, _)| *i);

    let mut c_arr: Vec<u8> = Vec::with_capacity(
        5 * G1_BYTES + SCALAR_BYTES + 4 + R * (4 + SCALAR_BYTES) + 8 + ph.len() + api_id.len(),
    );
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.Abar));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.Bbar));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.D));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.T1));
    c_arr.extend_from_slice(&g1_to_bytes(&init_res.T2));
    c_arr.extend_from_slice(&init_res.domain.to_bytes_be());
    c_arr.extend_from_slice(&i2osp(R, 4));
    for (i, m) in pairs {
        c_arr.extend_from_slice(&i2osp(i, 4));
        c_arr.extend_from_slice(&m.to_bytes());
    }
    c_arr.extend_from_slice(&i2osp(ph.len(), 8));
    c_arr.extend_from_slice(ph);
    c_arr.extend_from_slice(api_id);

    Ok(hash_to_scalar::<CS>(&c_arr, &h2s_dst::<CS>(api_id)))
}

/// # Description
/// Last step of proof generation: computes the Schnorr responses for the challenge.
///
/// # Output:
/// a [`BBSProof`] or [`Error::ProofGenError`].
pub fn proof_finalize(
    init_res: &ProofInitResult,
    challenge: Scalar,
    e: Scalar,
    random_scalars: &[Scalar],
    undisclosed_messages: &[BBSMessage],
) -> Result<BBSProof, Error> {
    let U = undisclosed_messages.len();
    if random_scalars.len() != 5 + U {
        return Err(Error::ProofGenError(format!(
            "expected {} random scalars, got {}",
            5 + U,
            random_scalars.len()
        )));
    }

    let r1 = random_scalars[0];
    let r2 = random_scalars[1];
    let e_tilde = random_scalars[2];
    let r1_tilde = random_scalars[3];
    let r3_tilde = random_scalars[4];
    let m_tilde = &random_scalars[5..];

    let r3 = Option::<Scalar>::from(r2.invert())
        .ok_or_else(|| Error::ProofGenError("r2 is not invertible".to_owned()))?;

    let e_hat = e_tilde + e * challenge;
    let r1_hat = r1_tilde - r1 * challenge;
    let r3_hat = r3_tilde - r3 * challenge;

    let commitments: Vec<Scalar> = m_tilde
        .iter()
        .zip(undisclosed_messages)
        .map(|(m_t, m)| m_t + m.value * challenge)
        .collect();

    Ok(BBSProof {
        Abar: init_res.Abar,
        Bbar: init_res.Bbar,
        D: init_res.D,
        e_hat,
        r1_hat,
        r3_hat,
        commitments,
        challenge,
    })
}

/// # Description
/// Recomputes `T1`, `T2` from a proof and the disclosed messages.
///
/// # Inputs:
/// * `disclosed_messages` (REQUIRED), the revealed messages as scalars, in the order of `disclosed_indexes`.
/// * `disclosed_indexes` (REQUIRED), strictly ascending indexes of the revealed messages.
///
/// # Output:
/// a [`ProofInitResult`], or [`Error`] if the disclosure data does not fit the proof or the generators.
pub fn proof_verify_init<CS: BbsCiphersuite>(
    pk: &BBSPublicKey,
    proof: &BBSProof,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
    disclosed_messages: &[BBSMessage],
    disclosed_indexes: &[usize],
) -> Result<ProofInitResult, Error> {
    let U = proof.commitments.len();
    let R = disclosed_indexes.len();
    let L = U + R;

    if disclosed_messages.len() != R {
        return Err(Error::MalformedInputError(
            "number of disclosed indexes different from number of disclosed messages".to_owned(),
        ));
    }
    if disclosed_indexes.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::MalformedInputError(
            "disclosed indexes must be sorted and distinct".to_owned(),
        ));
    }
    if disclosed_indexes.last().map_or(false, |&i| i >= L) {
        return Err(Error::MalformedInputError(
            "disclosed index out of range".to_owned(),
        ));
    }

    let H_points = generators.h_points(L)?;
    let Q1 = generators.q1();
    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, generators.api_id());

    let undisclosed_indexes = get_remaining_indexes(L, disclosed_indexes);

    let c = proof.challenge;
    let T1 = proof.Bbar * c + proof.Abar * proof.e_hat + proof.D * proof.r1_hat;

    // Bv = P1 + Q_1 * domain + sum over disclosed of H_i * msg_i
    let mut Bv = G1Projective::GENERATOR + Q1 * domain;
    for (&i, m) in disclosed_indexes.iter().zip(disclosed_messages) {
        Bv += H_points[i] * m.value;
    }

    let mut T2 = Bv * c + proof.D * proof.r3_hat;
    for (&j, commitment) in undisclosed_indexes.iter().zip(&proof.commitments) {
        T2 += H_points[j] * commitment;
    }

    Ok(ProofInitResult {
        Abar: proof.Abar,
        Bbar: proof.Bbar,
        D: proof.D,
        T1,
        T2,
        domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::{
        ciphersuites::{Bls12381Sha256, Bls12381Shake256},
        keys::BBSKeyPair,
    };
    use crate::utils::util::bbs_utils::seeded_random_scalars;
    use ff::Field;

    const IKM: &[u8] = b"proof-test-ikm-0123456789abcdef0123";
    const MESSAGES: [&str; 3] = ["m0", "m1", "m2"];

    struct Fixture<CS: BbsCiphersuite> {
        pk: BBSPublicKey,
        signature: BBSSignature,
        generators: Generators<CS>,
    }

    fn fixture<CS: BbsCiphersuite>(messages: &[&str]) -> Fixture<CS> {
        let (pk, sk) = BBSKeyPair::generate::<CS>(Some(IKM), None).into_parts();
        let generators = Generators::<CS>::create(10, Some(b"proof-api")).unwrap();
        let signature = BBSSignature::sign(&sk, &generators, Some(b"h"), messages).unwrap();
        Fixture {
            pk,
            signature,
            generators,
        }
    }

    fn disclose_middle_message<CS: BbsCiphersuite>() {
        let f = fixture::<CS>(&MESSAGES);
        let proof = BBSProof::generate(
            &f.pk,
            &f.signature,
            &f.generators,
            Some(b"h"),
            None,
            &MESSAGES,
            &[1],
        )
        .unwrap();

        assert_eq!(proof.commitments.len(), 2);
        assert!(proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m1"], &[1]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["mX"], &[1]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m1"], &[0]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"x"), None, &["m1"], &[1]));
    }

    fn every_disclosure_subset<CS: BbsCiphersuite>() {
        let messages = ["a", "b", "c", "d"];
        let f = fixture::<CS>(&messages);
        for mask in 0u32..(1 << messages.len()) {
            let disclosed: Vec<usize> = (0..messages.len()).filter(|i| mask & (1 << i) != 0).collect();
            let revealed: Vec<&str> = disclosed.iter().map(|&i| messages[i]).collect();

            let proof = BBSProof::generate(
                &f.pk,
                &f.signature,
                &f.generators,
                Some(b"h"),
                Some(b"nonce"),
                &messages,
                &disclosed,
            )
            .unwrap();

            assert_eq!(proof.commitments.len(), messages.len() - disclosed.len());
            assert!(proof.verify(&f.pk, &f.generators, Some(b"h"), Some(b"nonce"), &revealed, &disclosed));
        }
    }

    fn presentation_header_is_bound<CS: BbsCiphersuite>() {
        let f = fixture::<CS>(&MESSAGES);
        let proof = BBSProof::generate(
            &f.pk,
            &f.signature,
            &f.generators,
            Some(b"h"),
            Some(b"nonce-1"),
            &MESSAGES,
            &[0, 2],
        )
        .unwrap();

        assert!(proof.verify(&f.pk, &f.generators, Some(b"h"), Some(b"nonce-1"), &["m0", "m2"], &[0, 2]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), Some(b"nonce-2"), &["m0", "m2"], &[0, 2]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m0", "m2"], &[0, 2]));
    }

    macro_rules! proof_tests {
        ($($name:ident: $cs:ty,)*) => {
            $(
                mod $name {
                    use super::*;

                    #[test]
                    fn disclose_middle() {
                        disclose_middle_message::<$cs>();
                    }

                    #[test]
                    fn all_subsets() {
                        every_disclosure_subset::<$cs>();
                    }

                    #[test]
                    fn presentation_header() {
                        presentation_header_is_bound::<$cs>();
                    }
                }
            )*
        };
    }

    proof_tests! {
        sha256: Bls12381Sha256,
        shake256: Bls12381Shake256,
    }

    #[test]
    fn proofs_are_unlinkable() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let prove = || {
            BBSProof::generate(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &MESSAGES, &[1])
                .unwrap()
        };
        let (p1, p2) = (prove(), prove());
        assert_ne!(p1.Abar, p2.Abar);
        assert_ne!(p1.Bbar, p2.Bbar);
        assert_ne!(p1.D, p2.D);
        assert_ne!(p1.Abar, f.signature.a);
    }

    #[test]
    fn disclosed_order_does_not_matter() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let proof = BBSProof::generate(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &MESSAGES, &[2, 0, 2])
            .unwrap();
        assert_eq!(proof.commitments.len(), 1);
        assert!(proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m2", "m0"], &[2, 0]));
        assert!(proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m0", "m2"], &[0, 2]));
    }

    #[test]
    fn malformed_disclosure_is_rejected() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let proof = BBSProof::generate(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &MESSAGES, &[0])
            .unwrap();

        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m0", "m1"], &[0]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m0", "m0"], &[0, 0]));
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m0"], &[3]));

        let small = Generators::<Bls12381Sha256>::create(2, Some(b"proof-api")).unwrap();
        assert!(!proof.verify(&f.pk, &small, Some(b"h"), None, &["m0"], &[0]));
    }

    #[test]
    fn out_of_range_index_fails_generation() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let result = BBSProof::generate(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &MESSAGES, &[3]);
        assert!(matches!(result, Err(Error::ProofGenError(_))));
    }

    #[test]
    fn tampered_proof_fails() {
        let f = fixture::<Bls12381Shake256>(&MESSAGES);
        let proof = BBSProof::generate(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &MESSAGES, &[1])
            .unwrap();

        let mut bad = proof.clone();
        bad.e_hat += Scalar::ONE;
        assert!(!bad.verify(&f.pk, &f.generators, Some(b"h"), None, &["m1"], &[1]));

        let mut bad = proof.clone();
        bad.commitments[0] += Scalar::ONE;
        assert!(!bad.verify(&f.pk, &f.generators, Some(b"h"), None, &["m1"], &[1]));

        let other = BBSKeyPair::generate::<Bls12381Shake256>(Some(b"some-other-ikm-some-other-ikm-xx"), None);
        assert!(!proof.verify(other.public_key(), &f.generators, Some(b"h"), None, &["m1"], &[1]));
    }

    #[test]
    fn proof_from_forged_signature_fails() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let forged = BBSSignature {
            a: f.signature.a,
            e: f.signature.e + Scalar::ONE,
        };
        let proof = BBSProof::generate(&f.pk, &forged, &f.generators, Some(b"h"), None, &MESSAGES, &[1])
            .unwrap();
        assert!(!proof.verify(&f.pk, &f.generators, Some(b"h"), None, &["m1"], &[1]));
    }

    #[test]
    fn deterministic_with_fixed_randomness() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let message_scalars = BBSMessage::messages_to_scalar::<Bls12381Sha256, _>(&MESSAGES, b"proof-api");
        let random_scalars = seeded_random_scalars::<Bls12381Sha256>(5 + 2, b"proof");

        let p1 = core_proof_gen(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &message_scalars, &[1], &random_scalars)
            .unwrap();
        let p2 = core_proof_gen(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &message_scalars, &[1], &random_scalars)
            .unwrap();
        assert_eq!(p1, p2);

        // the verifier recomputes the prover's T1 and T2
        let init = proof_init(&f.pk, &f.signature, &f.generators, &random_scalars, Some(b"h"), &message_scalars, &[0, 2])
            .unwrap();
        let verify_init =
            proof_verify_init(&f.pk, &p1, &f.generators, Some(b"h"), &message_scalars[1..2], &[1]).unwrap();
        assert_eq!(init, verify_init);
    }

    #[test]
    fn wrong_random_scalar_count() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let message_scalars = BBSMessage::messages_to_scalar::<Bls12381Sha256, _>(&MESSAGES, b"proof-api");
        let result = proof_init(
            &f.pk,
            &f.signature,
            &f.generators,
            &[Scalar::ONE; 3],
            Some(b"h"),
            &message_scalars,
            &[0],
        );
        assert!(matches!(result, Err(Error::ProofGenError(_))));
    }

    #[test]
    fn identity_points_cannot_forge_a_proof() {
        // Abar = Bbar = Identity_G1 satisfies the pairing equation for any key, so the
        // forger only needs D and the Schnorr responses over messages of their choosing.
        let pk = *BBSKeyPair::generate::<Bls12381Sha256>(None, None).public_key();
        let generators = Generators::<Bls12381Sha256>::create(3, Some(b"api")).unwrap();
        let chosen = BBSMessage::messages_to_scalar::<Bls12381Sha256, _>(&["x", "forged", "y"], b"api");
        let no_signature = BBSSignature {
            a: G1Projective::IDENTITY,
            e: Scalar::ONE,
        };
        let mut random_scalars = seeded_random_scalars::<Bls12381Sha256>(5 + 2, b"forgery");
        random_scalars[0] = Scalar::ZERO;

        let init = proof_init(&pk, &no_signature, &generators, &random_scalars, Some(b"h"), &chosen, &[0, 2])
            .unwrap();
        assert!(bool::from(init.Abar.is_identity()));
        assert!(bool::from(init.Bbar.is_identity()));

        let challenge =
            proof_challenge_calculate::<Bls12381Sha256>(&init, &chosen[1..2], &[1], None, b"api").unwrap();
        let forged = proof_finalize(&init, challenge, no_signature.e, &random_scalars, &[chosen[0], chosen[2]])
            .unwrap();

        // the Schnorr equations hold, only the identity check stops it
        let recomputed = proof_verify_init(&pk, &forged, &generators, Some(b"h"), &chosen[1..2], &[1]).unwrap();
        assert_eq!(
            proof_challenge_calculate::<Bls12381Sha256>(&recomputed, &chosen[1..2], &[1], None, b"api").unwrap(),
            forged.challenge
        );
        assert!(!forged.verify(&pk, &generators, Some(b"h"), None, &["forged"], &[1]));

        assert!(matches!(
            BBSProof::from_bytes(&forged.to_bytes()),
            Err(Error::MalformedInputError(_))
        ));
    }

    #[test]
    fn proof_bytes_round_trip() {
        let f = fixture::<Bls12381Sha256>(&MESSAGES);
        let proof = BBSProof::generate(&f.pk, &f.signature, &f.generators, Some(b"h"), None, &MESSAGES, &[0])
            .unwrap();
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), 3 * 48 + 3 * 32 + 4 + 2 * 32 + 32);
        assert_eq!(BBSProof::from_bytes(&bytes).unwrap(), proof);

        assert!(matches!(
            BBSProof::from_bytes(&bytes[..bytes.len() - 1]),
            Err(Error::MalformedInputError(_))
        ));
        assert!(matches!(BBSProof::from_bytes(&[0u8; 10]), Err(Error::MalformedInputError(_))));
    }
}
