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
    ciphersuites::{BbsCiphersuite, HASH_LEN},
    generators::Generators,
};
use crate::{
    errors::Error,
    utils::{
        message::BBSMessage,
        util::bbs_utils::{
            calculate_random_scalars, g1_to_bytes, get_random, h2s_dst, hash_to_scalar, i2osp,
            parse_g1_projective, parse_scalar, ScalarExt, G1_BYTES, SCALAR_BYTES,
        },
    },
};
use bls12_381_plus::{G1Projective, Scalar};
use serde::{Deserialize, Serialize};

/// A Pedersen commitment `C = r * H_1 + msg_1 * H_2 + ... + msg_U * H_(U+1)` to the hidden messages.
///
/// `blinding` is the holder's secret `r`: only [`BlindCommitment::commitment`] and
/// [`BlindCommitment::hidden_count`] are meant for the signer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlindCommitment {
    pub commitment: G1Projective,
    pub blinding: Scalar,
    pub hidden_count: usize,
}

impl BlindCommitment {
    pub const BYTES: usize = G1_BYTES + SCALAR_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..G1_BYTES].copy_from_slice(&g1_to_bytes(&self.commitment));
        bytes[G1_BYTES..].copy_from_slice(&self.blinding.to_bytes_be());
        bytes
    }

    /// The number of hidden messages is not part of the encoding and has to be supplied.
    pub fn from_bytes(bytes: &[u8], hidden_count: usize) -> Result<Self, Error> {
        if bytes.len() != Self::BYTES {
            return Err(Error::MalformedInputError(format!(
                "commitment must be {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            )));
        }
        let commitment = parse_g1_projective(&bytes[..G1_BYTES])?;
        let blinding = parse_scalar(&bytes[G1_BYTES..])?;
        Ok(Self {
            commitment,
            blinding,
            hidden_count,
        })
    }

    /// `hash(C)`, the octet string signed in place of the hidden messages.
    pub fn digest<CS: BbsCiphersuite>(&self) -> [u8; HASH_LEN] {
        CS::hash(&[&g1_to_bytes(&self.commitment)])
    }
}

/// Schnorr proof of knowledge of the opening `(r, msg_1, ..., msg_U)` of a [`BlindCommitment`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CommitmentProof {
    pub challenge: Scalar,
    pub responses: Vec<Scalar>,
    pub r: G1Projective,
}

impl CommitmentProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> =
            Vec::with_capacity(SCALAR_BYTES * (self.responses.len() + 1) + 4 + G1_BYTES);
        bytes.extend_from_slice(&self.challenge.to_bytes_be());
        bytes.extend_from_slice(&i2osp(self.responses.len(), 4));
        self.responses
            .iter()
            .for_each(|s| bytes.extend_from_slice(&s.to_bytes_be()));
        bytes.extend_from_slice(&g1_to_bytes(&self.r));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let header_len = SCALAR_BYTES + 4;
        if bytes.len() < header_len + G1_BYTES {
            return Err(Error::MalformedInputError(
                "commitment proof is too short".to_owned(),
            ));
        }
        let challenge = parse_scalar(&bytes[..SCALAR_BYTES])?;

        let mut count_bytes = [0u8; 4];
        count_bytes.copy_from_slice(&bytes[SCALAR_BYTES..header_len]);
        let count = u32::from_be_bytes(count_bytes) as usize;

        let expected_len = count
            .checked_mul(SCALAR_BYTES)
            .and_then(|n| n.checked_add(header_len + G1_BYTES));
        if expected_len != Some(bytes.len()) {
            return Err(Error::MalformedInputError(format!(
                "commitment proof with {} responses has the wrong length",
                count
            )));
        }

        let responses = bytes[header_len..header_len + count * SCALAR_BYTES]
            .chunks(SCALAR_BYTES)
            .map(parse_scalar)
            .collect::<Result<Vec<Scalar>, Error>>()?;
        let r = parse_g1_projective(&bytes[header_len + count * SCALAR_BYTES..])?;

        Ok(Self {
            challenge,
            responses,
            r,
        })
    }

    /// # Description
    /// Checks the proof of knowledge of the opening of `commitment` over `generators`
    /// (`[H_1, ..., H_(U+1)]`, the same window used to build the commitment).
    ///
    /// # Inputs:
    /// * `commitment` (REQUIRED), the commitment the proof refers to.
    /// * `generators` (REQUIRED), the commitment generators window.
    /// * `api_id` (REQUIRED), octet string.
    ///
    /// # Output:
    /// `true` if the recomputed challenge matches. A window whose length differs from the
    /// number of responses yields `false`.
    pub fn verify<CS: BbsCiphersuite>(
        &self,
        commitment: &BlindCommitment,
        generators: &[G1Projective],
        api_id: &[u8],
    ) -> bool {
        if generators.len() != self.responses.len() {
            return false;
        }

        // R' = sum(responses_i * gen_i) - challenge * C
        let mut R_prime = -(commitment.commitment * self.challenge);
        for (g, s) in generators.iter().zip(&self.responses) {
            R_prime += g * s;
        }

        commitment_challenge::<CS>(&commitment.commitment, &R_prime, api_id) == self.challenge
    }
}

/// `hash_to_scalar(C || R || api_id, api_id || "H2S_")`
fn commitment_challenge<CS: BbsCiphersuite>(
    commitment: &G1Projective,
    R: &G1Projective,
    api_id: &[u8],
) -> Scalar {
    let c_input = [&g1_to_bytes(commitment)[..], &g1_to_bytes(R), api_id].concat();
    hash_to_scalar::<CS>(&c_input, &h2s_dst::<CS>(api_id))
}

/// # Description
/// Used by the holder to commit to the messages it wants signed without revealing them,
/// together with a proof of knowledge of the commitment opening.
///
/// # Inputs:
/// * `hidden_messages` (REQUIRED), the octet strings to hide from the signer.
/// * `blinding` (OPTIONAL), the blinding factor `r`. A fresh random scalar is drawn if not supplied.
/// * `generators` (REQUIRED), generators with at least `1 + hidden_messages.len()` message generators.
///
/// # Output:
/// ([`BlindCommitment`], [`CommitmentProof`]) or [`Error::TooManyMessagesError`].
pub fn create_commitment<CS, M>(
    hidden_messages: &[M],
    blinding: Option<Scalar>,
    generators: &Generators<CS>,
) -> Result<(BlindCommitment, CommitmentProof), Error>
where
    CS: BbsCiphersuite,
    M: AsRef<[u8]>,
{
    let U = hidden_messages.len();
    let randomness = calculate_random_scalars(1 + U);
    commit_with_randomness(
        hidden_messages,
        blinding.unwrap_or_else(get_random),
        &randomness,
        generators,
    )
}

pub(crate) fn commit_with_randomness<CS, M>(
    hidden_messages: &[M],
    blinding: Scalar,
    randomness: &[Scalar],
    generators: &Generators<CS>,
) -> Result<(BlindCommitment, CommitmentProof), Error>
where
    CS: BbsCiphersuite,
    M: AsRef<[u8]>,
{
    let U = hidden_messages.len();
    let pok_generators = generators.h_points(1 + U)?;
    if randomness.len() != 1 + U {
        return Err(Error::MalformedInputError(format!(
            "expected {} random scalars, got {}",
            1 + U,
            randomness.len()
        )));
    }

    let api_id = generators.api_id();
    let msg_scalars = BBSMessage::messages_to_scalar::<CS, M>(hidden_messages, api_id);

    let mut secrets: Vec<Scalar> = Vec::with_capacity(1 + U);
    secrets.push(blinding);
    secrets.extend(msg_scalars.iter().map(|m| m.value));

    // C = r * H_1 + msg_1 * H_2 + ... + msg_U * H_(U+1)
    let mut C = G1Projective::IDENTITY;
    let mut R = G1Projective::IDENTITY;
    for ((g, secret), t) in pok_generators.iter().zip(&secrets).zip(randomness) {
        C += g * secret;
        R += g * t;
    }

    let challenge = commitment_challenge::<CS>(&C, &R, api_id);

    let responses: Vec<Scalar> = randomness
        .iter()
        .zip(&secrets)
        .map(|(t, secret)| t + challenge * secret)
        .collect();

    log::debug!("committed to {} hidden messages", U);

    Ok((
        BlindCommitment {
            commitment: C,
            blinding,
            hidden_count: U,
        },
        CommitmentProof {
            challenge,
            responses,
            r: R,
        },
    ))
}
