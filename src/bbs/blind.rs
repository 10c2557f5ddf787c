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
    commitment::{create_commitment, BlindCommitment, CommitmentProof},
    generators::Generators,
    keys::{BBSPublicKey, BBSSecretKey},
    signature::{core_sign, core_verify, BBSSignature},
};
use crate::{errors::Error, utils::message::BBSMessage};
use bls12_381_plus::Scalar;

/// The messages actually signed during blind issuance: `[hash(C), known_1, ..., known_K]`.
fn signed_messages<CS, M>(commitment: &BlindCommitment, known_messages: &[M], api_id: &[u8]) -> Vec<BBSMessage>
where
    CS: BbsCiphersuite,
    M: AsRef<[u8]>,
{
    let mut messages = Vec::with_capacity(1 + known_messages.len());
    messages.push(BBSMessage::map_message_to_scalar::<CS>(
        &commitment.digest::<CS>(),
        api_id,
    ));
    messages.extend(BBSMessage::messages_to_scalar::<CS, M>(known_messages, api_id));
    messages
}

/// # Description
/// Used by the signer to issue a signature over a commitment to hidden messages and a list of known messages.
/// The commitment proof is checked against `[H_1, ..., H_(1 + hidden_count)]` first.
///
/// # Inputs:
/// * `sk` (REQUIRED), the signer secret key.
/// * `commitment` (REQUIRED), the holder commitment.
/// * `known_messages` (REQUIRED), the messages the signer sees in clear.
/// * `proof` (REQUIRED), the proof of knowledge of the commitment opening.
/// * `generators` (REQUIRED), the generators shared by holder and signer.
/// * `header` (OPTIONAL), an octet string. Defaults to the empty string.
///
/// # Output:
/// a [`BBSSignature`], [`Error::ProofVerificationError`] if the commitment proof is invalid,
/// or any error from signing.
pub fn blind_sign<CS, M>(
    sk: &BBSSecretKey,
    commitment: &BlindCommitment,
    known_messages: &[M],
    proof: &CommitmentProof,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
) -> Result<BBSSignature, Error>
where
    CS: BbsCiphersuite,
    M: AsRef<[u8]>,
{
    let window = generators
        .message_generators()
        .get(..1 + commitment.hidden_count)
        .ok_or(Error::ProofVerificationError)?;

    if !proof.verify::<CS>(commitment, window, generators.api_id()) {
        return Err(Error::ProofVerificationError);
    }

    let messages = signed_messages::<CS, M>(commitment, known_messages, generators.api_id());
    log::debug!(
        "blind signing a commitment to {} hidden messages and {} known messages",
        commitment.hidden_count,
        known_messages.len()
    );
    core_sign(sk, generators, header, &messages)
}

/// The blind signature is already usable by the holder as is.
pub fn unblind_signature(signature: BBSSignature) -> BBSSignature {
    signature
}

/// # Description
/// Verifies a signature issued by [`blind_sign`] over `[hash(C)] ++ known_messages`.
///
/// # Output:
/// `true` if valid.
pub fn verify_blind_signature<CS, M>(
    pk: &BBSPublicKey,
    signature: &BBSSignature,
    commitment: &BlindCommitment,
    known_messages: &[M],
    generators: &Generators<CS>,
    header: Option<&[u8]>,
) -> bool
where
    CS: BbsCiphersuite,
    M: AsRef<[u8]>,
{
    let messages = signed_messages::<CS, M>(commitment, known_messages, generators.api_id());
    core_verify(pk, signature, generators, header, &messages)
}

/// # Description
/// Runs holder and signer sides of blind issuance in sequence: commitment creation,
/// blind signing and unblinding.
///
/// # Output:
/// (the unblinded [`BBSSignature`], the [`BlindCommitment`]) or [`Error`].
pub fn execute_blind_signing<CS, H, K>(
    sk: &BBSSecretKey,
    hidden_messages: &[H],
    known_messages: &[K],
    blinding: Option<Scalar>,
    generators: &Generators<CS>,
    header: Option<&[u8]>,
) -> Result<(BBSSignature, BlindCommitment), Error>
where
    CS: BbsCiphersuite,
    H: AsRef<[u8]>,
    K: AsRef<[u8]>,
{
    let (commitment, proof) = create_commitment(hidden_messages, blinding, generators)?;
    let signature = blind_sign(sk, &commitment, known_messages, &proof, generators, header)?;
    Ok((unblind_signature(signature), commitment))
}
