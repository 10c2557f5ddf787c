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

use crate::{
    bbs::ciphersuites::BbsCiphersuite,
    utils::util::bbs_utils::{h2s_dst, hash_to_scalar, ScalarExt, SCALAR_BYTES},
};
use bls12_381_plus::Scalar;
use serde::{Deserialize, Serialize};

/// A signed message, already mapped to a scalar.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSMessage {
    pub value: Scalar,
}

impl BBSMessage {
    pub fn new(msg: Scalar) -> Self {
        Self { value: msg }
    }

    /// # Description
    /// Maps an octet string to a scalar with `hash_to_scalar(message, api_id || "H2S_")`.
    ///
    /// # Inputs:
    /// * `message` (REQUIRED), an octet string.
    /// * `api_id` (REQUIRED), the API identifier scoping the deployment.
    ///
    /// # Output:
    /// a [`BBSMessage`].
    pub fn map_message_to_scalar<CS: BbsCiphersuite>(message: &[u8], api_id: &[u8]) -> Self {
        Self::new(hash_to_scalar::<CS>(message, &h2s_dst::<CS>(api_id)))
    }

    pub fn messages_to_scalar<CS, M>(messages: &[M], api_id: &[u8]) -> Vec<Self>
    where
        CS: BbsCiphersuite,
        M: AsRef<[u8]>,
    {
        messages
            .iter()
            .map(|m| Self::map_message_to_scalar::<CS>(m.as_ref(), api_id))
            .collect()
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        self.value.to_bytes_be()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::ciphersuites::{Bls12381Sha256, Bls12381Shake256};

    #[test]
    fn mapping_is_scoped_by_api_id() {
        let a = BBSMessage::map_message_to_scalar::<Bls12381Sha256>(b"m0", b"app-A");
        let b = BBSMessage::map_message_to_scalar::<Bls12381Sha256>(b"m0", b"app-B");
        assert_ne!(a, b);
        assert_eq!(a, BBSMessage::map_message_to_scalar::<Bls12381Sha256>(b"m0", b"app-A"));
    }

    #[test]
    fn mapping_depends_on_ciphersuite() {
        assert_ne!(
            BBSMessage::map_message_to_scalar::<Bls12381Sha256>(b"m0", b""),
            BBSMessage::map_message_to_scalar::<Bls12381Shake256>(b"m0", b"")
        );
    }

    #[test]
    fn messages_keep_their_order() {
        let msgs = ["m0", "m1", "m2"];
        let scalars = BBSMessage::messages_to_scalar::<Bls12381Sha256, _>(&msgs, b"");
        assert_eq!(scalars.len(), 3);
        assert_eq!(
            scalars[2],
            BBSMessage::map_message_to_scalar::<Bls12381Sha256>(b"m2", b"")
        );
    }
}
