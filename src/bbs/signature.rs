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
    keys::{BBSPublicKey, BBSSecretKey},
};
use crate::{
    errors::Error,
    utils::{
        message::BBSMessage,
        util::bbs_utils::{
            calculate_b, calculate_domain, g1_to_bytes, h2s_dst, hash_to_scalar, pairing_check,
            parse_g1_projective, parse_scalar, ScalarExt, G1_BYTES, SCALAR_BYTES,
        },
    },
};
use bls12_381_plus::{G1Projective, G2Projective, Scalar};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSSignature {
    pub a: G1Projective,
    pub e: Scalar,
}

impl BBSSignature {
    pub const BYTES: usize = G1_BYTES + SCALAR_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..G1_BYTES].copy_from_slice(&g1_to_bytes(&self.a));
        bytes[G1_BYTES..].copy_from_slice(&self.e.to_bytes_be());
        bytes
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != Self::BYTES {
            return Err(Error::MalformedInputError(format!(
                "signature must be {} bytes, got {}",
                Self::BYTES,
                data.len()
            )));
        }
        let a = parse_g1_projective(&data[..G1_BYTES])?;
        let e = parse_scalar(&data[G1_BYTES..])?;
        Ok(Self { a, e })
    }

    /// # Description
    /// Signs an ordered list of messages, optionally bound to a header.
    ///
    /// # Inputs:
    /// * `sk` (REQUIRED), the signer secret key.
    /// * `generators` (REQUIRED), generators with room for at least `messages.len()` messages.
    /// * `header` (OPTIONAL), an octet string bound to the signature. Defaults to the empty string.
    /// * `messages` (REQUIRED), the octet strings to sign.
    ///
    /// # Output:
    /// a [`BBSSignature`], [`Error::TooManyMessagesError`] or [`Error::DegenerateKeyError`].
    pub fn sign<CS, M>(
        sk: &BBSSecretKey,
        generators: &Generators<CS>,
        header: Option<&[u8]>,
        messages: &[M],
    ) -> Result<Self, Error>
    where
        CS: BbsCiphersuite,
        M: AsRef<[u8]>,
    {
        let message_scalars = BBSMessage::messages_to_scalar::<CS, M>(messages, generators.api_id());
        core_sign(sk, generators, header, &message_scalars)
    }

    /// # Description
    /// Checks the signature against the public key, the header and the full list of messages.
    ///
    /// # Output:
    /// `true` if valid. Any mismatch, including more messages than `generators` supports, yields `false`.
    pub fn verify<CS, M>(
        &self,
        pk: &BBSPublicKey,
        generators: &Generators<CS>,
        header: Option<&[u8]>,
        messages: &[M],
    ) -> bool
    where
        CS: BbsCiphersuite,
        M: AsRef<[u8]>,
    {
        let message_scalars = BBSMessage::messages_to_scalar::<CS, M>(messages, generators.api_id());
        core_verify(pk, self, generators, header, &message_scalars)
    }
}

pub(crate) fn core_sign<CS: BbsCiphersuite>(
    sk: &BBSSecretKey,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
    messages: &[BBSMessage],
) -> Result<BBSSignature, Error> {
    let L = messages.len();
    let H_points = generators.h_points(L)?;
    let Q1 = generators.q1();
    let api_id = generators.api_id();

    let pk = sk.public_key();
    let domain = calculate_domain::<CS>(&pk, Q1, H_points, header, api_id);

    // e = hash_to_scalar(SK || msg_1 || ... || msg_L || domain, api_id || "H2S_")
    let mut e_input: Vec<u8> = Vec::with_capacity(SCALAR_BYTES * (L + 2));
    e_input.extend_from_slice(&sk.to_bytes());
    messages
        .iter()
        .for_each(|m| e_input.extend_from_slice(&m.to_bytes()));
    e_input.extend_from_slice(&domain.to_bytes_be());
    let e = hash_to_scalar::<CS>(&e_input, &h2s_dst::<CS>(api_id));

    let B = calculate_b(Q1, H_points, domain, messages);

    // A = B * (1 / (SK + e))
    let sk_plus_e_inv = Option::<Scalar>::from((sk.0 + e).invert()).ok_or(Error::DegenerateKeyError)?;
    let A = B * sk_plus_e_inv;

    log::debug!("signed {} messages", L);
    Ok(BBSSignature { a: A, e })
}

pub(crate) fn core_verify<CS: BbsCiphersuite>(
    pk: &BBSPublicKey,
    signature: &BBSSignature,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
    messages: &[BBSMessage],
) -> bool {
    let H_points = match generators.h_points(messages.len()) {
        Ok(points) => points,
        Err(_) => return false,
    };
    let Q1 = generators.q1();

    let domain = calculate_domain::<CS>(pk, Q1, H_points, header, generators.api_id());
    let B = calculate_b(Q1, H_points, domain, messages);

    // e(A, W + e * P2) * e(B, -P2) == Identity_GT
    let A2 = pk.0 + G2Projective::GENERATOR * signature.e;
    pairing_check(signature.a, A2, B)
}
