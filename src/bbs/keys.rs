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

use super::ciphersuites::BbsCiphersuite;
use crate::{
    errors::Error,
    utils::util::bbs_utils::{
        g2_to_bytes, hash_to_scalar, parse_g2_projective, parse_scalar, ScalarExt, G2_BYTES,
        SCALAR_BYTES,
    },
};
use bls12_381_plus::{G2Projective, Scalar};
use group::Group;
use ff::Field;
use rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSPublicKey(pub G2Projective);

impl BBSPublicKey {
    pub const BYTES: usize = G2_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        g2_to_bytes(&self.0)
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let w = parse_g2_projective(bytes)?;
        if bool::from(w.is_identity()) {
            return Err(Error::MalformedInputError(
                "public key is the identity".to_owned(),
            ));
        }
        Ok(Self(w))
    }

    /// Parses a hex encoded public key, rejecting the identity.
    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = hex::decode(encoded)
            .map_err(|e| Error::MalformedInputError(format!("public key is not hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSSecretKey(pub Scalar);

impl BBSSecretKey {
    pub const BYTES: usize = SCALAR_BYTES;

    //in BE order
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.0.to_bytes_be()
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::BYTES {
            return Err(Error::MalformedInputError(
                "secret key must be 32 bytes".to_owned(),
            ));
        }
        let x = parse_scalar(bytes)?;
        if bool::from(x.is_zero()) {
            return Err(Error::MalformedInputError("secret key is zero".to_owned()));
        }
        Ok(Self(x))
    }

    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = hex::decode(encoded)
            .map_err(|e| Error::MalformedInputError(format!("secret key is not hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn public_key(&self) -> BBSPublicKey {
        BBSPublicKey(sk_to_pk(self.0))
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSKeyPair {
    public: BBSPublicKey,
    private: BBSSecretKey,
}

impl BBSKeyPair {
    /// # Description
    /// Generates a key pair, deterministically when `key_material` is supplied.
    ///
    /// # Inputs:
    /// * `key_material` (OPTIONAL), a secret octet string. 32 random bytes are drawn if not supplied.
    /// * `key_info` (OPTIONAL), an octet string. Defaults to an empty string if not supplied.
    ///
    /// # Output:
    /// a [`BBSKeyPair`].
    pub fn generate<CS: BbsCiphersuite>(
        key_material: Option<&[u8]>,
        key_info: Option<&[u8]>,
    ) -> Self {
        let sk = match key_material {
            Some(ikm) => key_gen::<CS>(ikm, key_info),
            None => {
                let mut ikm = vec![0u8; CS::IKM_LEN];
                rand::thread_rng().fill_bytes(&mut ikm);
                key_gen::<CS>(&ikm, key_info)
            }
        };
        let pk = sk_to_pk(sk);

        Self {
            public: BBSPublicKey(pk),
            private: BBSSecretKey(sk),
        }
    }

    pub fn public_key(&self) -> &BBSPublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &BBSSecretKey {
        &self.private
    }

    pub fn into_parts(self) -> (BBSPublicKey, BBSSecretKey) {
        (self.public, self.private)
    }
}

/// # Description
/// Derives a secret key from a secret octet string:
/// `SK = hash_to_scalar(key_material || keygen_dst || key_info, keygen_dst)`, with `0` mapped to `1`.
///
/// # Inputs:
/// * `key_material` (REQUIRED), a secret octet string.
/// * `key_info` (OPTIONAL), an octet string. Defaults to an empty string if not supplied.
pub(crate) fn key_gen<CS: BbsCiphersuite>(key_material: &[u8], key_info: Option<&[u8]>) -> Scalar {
    let key_info = key_info.unwrap_or(&[]);
    let derive_input = [key_material, CS::KEYGEN_DST, key_info].concat();

    let sk = hash_to_scalar::<CS>(&derive_input, CS::KEYGEN_DST);
    if bool::from(sk.is_zero()) {
        Scalar::ONE
    } else {
        sk
    }
}

/// `W = SK * P2`
pub(crate) fn sk_to_pk(sk: Scalar) -> G2Projective {
    G2Projective::GENERATOR * sk
}
