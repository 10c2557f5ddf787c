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

//! BBS signatures over BLS12-381 with selective disclosure proofs and blind issuance.
//!
//! See the [`bbs`] module for the scheme and [`config::BbsConfig`] for deployment parameters.

#![allow(non_snake_case)]

/// Module for the BBS signature scheme
pub mod bbs;
/// Module for deployment configuration
pub mod config;
/// Module for errors
pub mod errors;
/// Module for utilities
pub mod utils;

pub use bbs::ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256};
pub use bbs::generators::Generators;
pub use bbs::keys::{BBSKeyPair, BBSPublicKey, BBSSecretKey};
pub use bbs::proof::BBSProof;
pub use bbs::signature::BBSSignature;
pub use config::BbsConfig;
pub use errors::Error;
