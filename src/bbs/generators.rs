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
    utils::util::bbs_utils::{g1_to_bytes, i2osp},
};
use bls12_381_plus::G1Projective;
use core::marker::PhantomData;
use group::Group;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// The generator set `[Q_1, H_1, ..., H_L]` derived from an API identifier.
///
/// It is immutable once created and is meant to be shared read-only by every
/// signing, verification and proof operation that uses the same `api_id`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generators<CS: BbsCiphersuite> {
    q1: G1Projective,
    message_generators: Vec<G1Projective>,
    api_id: Vec<u8>,
    _cs: PhantomData<CS>,
}

impl<CS: BbsCiphersuite> Serialize for Generators<CS> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let result: Vec<String> = self
            .message_generators
            .iter()
            .map(|item| hex::encode(g1_to_bytes(item)))
            .collect();

        let mut state = serializer.serialize_struct("Generators", 3)?;
        state.serialize_field("ApiId", &hex::encode(&self.api_id))?;
        state.serialize_field("Q1", &hex::encode(g1_to_bytes(&self.q1)))?;
        state.serialize_field("MsgGenerators", &result)?;
        state.end()
    }
}

impl<CS: BbsCiphersuite> Generators<CS> {
    /// # Description
    /// Deterministically derives the domain generator `Q_1` and `count` message generators.
    ///
    /// `Q_1 = hash_to_g1(generator_dst || "Q_1_" || api_id)` and
    /// `H_i = hash_to_g1(generator_dst || "H_" || I2OSP(i, 4) || api_id)` for `i` in `1..=count`.
    ///
    /// # Inputs:
    /// * `count` (REQUIRED), the maximum number of messages that can be signed.
    /// * `api_id` (OPTIONAL), octet string. If not supplied it defaults to the empty octet string.
    ///
    /// # Output:
    /// [`Generators`] or [`Error::GenerationError`] if a generator is the identity or repeats.
    pub fn create(count: usize, api_id: Option<&[u8]>) -> Result<Self, Error> {
        let api_id = api_id.unwrap_or(b"");
        log::debug!("creating {} message generators", count);

        let q1_seed = [CS::GENERATOR_DST, b"Q_1_", api_id].concat();
        let q1 = Self::hash_to_generator(&q1_seed, "Q_1")?;

        let mut message_generators: Vec<G1Projective> = Vec::with_capacity(count);
        for i in 1..=count {
            let seed = [CS::GENERATOR_DST, b"H_", &i2osp(i, 4), api_id].concat();
            let candidate = Self::hash_to_generator(&seed, &format!("H_{}", i))?;
            if candidate == q1 || message_generators.contains(&candidate) {
                return Err(Error::GenerationError(format!("H_{} is repeated", i)));
            }
            message_generators.push(candidate);
        }

        Ok(Self {
            q1,
            message_generators,
            api_id: api_id.to_vec(),
            _cs: PhantomData,
        })
    }

    fn hash_to_generator(seed: &[u8], name: &str) -> Result<G1Projective, Error> {
        let point = CS::hash_to_g1(seed, CS::GENERATOR_DST);
        if bool::from(point.is_identity()) {
            return Err(Error::GenerationError(format!("{} == Identity_G1", name)));
        }
        Ok(point)
    }

    pub fn q1(&self) -> G1Projective {
        self.q1
    }

    pub fn message_generators(&self) -> &[G1Projective] {
        &self.message_generators
    }

    pub fn api_id(&self) -> &[u8] {
        &self.api_id
    }

    /// Maximum number of messages these generators can sign.
    pub fn max_messages(&self) -> usize {
        self.message_generators.len()
    }

    /// `H_1..H_L`, or [`Error::TooManyMessagesError`] if `L` exceeds the capacity.
    pub fn h_points(&self, l: usize) -> Result<&[G1Projective], Error> {
        self.message_generators
            .get(..l)
            .ok_or(Error::TooManyMessagesError {
                provided: l,
                max: self.max_messages(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::ciphersuites::{Bls12381Sha256, Bls12381Shake256};

    #[test]
    fn generators_are_deterministic() {
        let g1 = Generators::<Bls12381Sha256>::create(5, Some(b"api")).unwrap();
        let g2 = Generators::<Bls12381Sha256>::create(5, Some(b"api")).unwrap();
        assert_eq!(g1, g2);
    }

    #[test]
    fn generators_are_a_prefix_of_larger_sets() {
        let small = Generators::<Bls12381Sha256>::create(3, None).unwrap();
        let large = Generators::<Bls12381Sha256>::create(10, None).unwrap();
        assert_eq!(small.q1(), large.q1());
        assert_eq!(small.message_generators(), &large.message_generators()[..3]);
    }

    #[test]
    fn api_id_scopes_generators() {
        let a = Generators::<Bls12381Shake256>::create(2, Some(b"A")).unwrap();
        let b = Generators::<Bls12381Shake256>::create(2, Some(b"B")).unwrap();
        assert_ne!(a.q1(), b.q1());
        assert_ne!(a.message_generators()[0], b.message_generators()[0]);
    }

    #[test]
    fn generators_are_distinct_and_not_identity() {
        let g = Generators::<Bls12381Sha256>::create(20, None).unwrap();
        let mut all = vec![g.q1()];
        all.extend_from_slice(g.message_generators());
        for (i, p) in all.iter().enumerate() {
            assert!(!bool::from(p.is_identity()));
            assert!(!all[i + 1..].contains(p));
        }
    }

    #[test]
    fn h_points_respects_capacity() {
        let g = Generators::<Bls12381Sha256>::create(4, None).unwrap();
        assert_eq!(g.h_points(4).unwrap().len(), 4);
        assert_eq!(g.h_points(0).unwrap().len(), 0);
        assert_eq!(
            g.h_points(5),
            Err(Error::TooManyMessagesError { provided: 5, max: 4 })
        );
    }

    #[test]
    fn generators_serialize_as_hex() {
        let g = Generators::<Bls12381Sha256>::create(2, Some(b"api")).unwrap();
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["ApiId"], hex::encode(b"api"));
        assert_eq!(json["MsgGenerators"].as_array().unwrap().len(), 2);
        assert_eq!(json["Q1"].as_str().unwrap().len(), 96);
    }
}
