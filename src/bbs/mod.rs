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

//! The BBS (Boneh-Boyen-Shacham) Signature Scheme over BLS12-381.
//!
//! A signer compactly signs an ordered list of messages with a single signature `(A, e)`.
//! A holder can then derive unlinkable zero-knowledge proofs of possession of that signature
//! that reveal only a chosen subset of the messages, optionally bound to a presentation header
//! (a nonce, an audience, a validity window).
//! With the `blind` feature, the holder can also obtain a signature over messages the signer
//! never sees, committed to with a Pedersen commitment and a Schnorr proof of knowledge.
//!
//! Every operation is parameterized by a [`ciphersuites::BbsCiphersuite`] and works on an
//! explicit [`generators::Generators`] set scoped by an API identifier.
//! # Usage
//! ```toml
//! bbscore = { version = "0.1", default-features = false }
//! ```
//! The blind issuance protocol is behind the `blind` feature, enabled by default.

#[cfg(feature = "blind")]
/// Module for blind signatures
pub mod blind;
/// Module for ciphersuites
pub mod ciphersuites;
#[cfg(feature = "blind")]
/// Module for commitments
pub mod commitment;
/// Module for generators
pub mod generators;
/// Module for keys
pub mod keys;
/// Module for proofs
pub mod proof;
/// Module for signatures
pub mod signature;
