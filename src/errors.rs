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

use thiserror::Error;

/// Errors returned by the BBS operations.
///
/// A failed cryptographic check (bad signature, bad proof, tampered messages) is
/// never reported through this type: verification functions return `false`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Hash-to-curve produced the identity or a duplicated generator.
    #[error("Error during generators creation: {0}")]
    GenerationError(String),
    #[error("Too many messages: {provided} provided, at most {max} supported")]
    TooManyMessagesError { provided: usize, max: usize },
    /// [More Info](https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-bbs-signatures-06#name-coresign) `SK + e == 0`
    #[error("Degenerate key: SK + e == 0")]
    DegenerateKeyError,
    #[error("Invalid commitment proof")]
    ProofVerificationError,
    #[error("Malformed input: {0}")]
    MalformedInputError(String),
    #[error("Error during computation of a Proof of Knowledge of a Signature: {0}")]
    ProofGenError(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
