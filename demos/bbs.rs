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

use bbscore::{
    bbs::ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256},
    config::BbsConfig,
    errors::Error,
    utils::util::bbs_utils::get_messages,
    BBSKeyPair, BBSProof, BBSSignature,
};
use rand::RngCore;
use std::env;

fn bbs_main<CS: BbsCiphersuite>() -> Result<(), Error> {
    const MSGS: [&str; 3] = [
        "9872ad089e452c7b6e283dfac2a80d58e8d0ff71cc4d5e310a1debdda4a45f02",
        "87a8bd656d49ee07b8110e1d8fd4f1dcef6fb9bc368c492d9bc8c4f98a739ac6",
        "96012096adda3f13dd4adbe4eea481a4c4b5717932b73b00e31807d3c5894b90",
    ];

    log::info!("Messages: {:?}", MSGS);

    const HEADER_HEX: &str = "11223344556677889900aabbccddeeff";
    let header = hex::decode(HEADER_HEX).map_err(|e| Error::MalformedInputError(e.to_string()))?;

    let config = BbsConfig::new(10, "bbs-demo")?;
    let generators = config.generators::<CS>()?;
    log::info!(
        "Generators: Q1 + {} message generators",
        generators.max_messages()
    );

    log::info!("Keypair Generation");
    let issuer_keypair = BBSKeyPair::generate::<CS>(None, None);
    let issuer_sk = issuer_keypair.private_key();
    log::info!("SK: {}", issuer_sk.encode());
    let issuer_pk = issuer_keypair.public_key();
    log::info!("PK: {}", issuer_pk.encode());

    let messages: Vec<Vec<u8>> = MSGS
        .iter()
        .map(|m| hex::decode(m).map_err(|e| Error::MalformedInputError(e.to_string())))
        .collect::<Result<_, _>>()?;

    log::info!("Signature Computation...");
    let signature = BBSSignature::sign(issuer_sk, &generators, Some(&header), &messages)?;
    log::info!("Signature: {}", hex::encode(signature.to_bytes()));

    assert!(
        signature.verify(issuer_pk, &generators, Some(&header), &messages),
        "Signature verification FAILED!"
    );
    log::info!("Signature is VALID");

    //Holder receive nonce from Verifier
    log::info!("Generate Nonce...");
    let mut nonce_verifier = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut nonce_verifier);
    log::info!("Nonce: {}", hex::encode(nonce_verifier));

    let disclosed_indexes = [0usize, 2usize];

    //Holder generates the proof
    log::info!("Proof of Knowledge of the Signature Generation...");
    let proof = BBSProof::generate(
        issuer_pk,
        &signature,
        &generators,
        Some(&header),
        Some(&nonce_verifier),
        &messages,
        &disclosed_indexes,
    )?;
    log::info!("Proof: {}", hex::encode(proof.to_bytes()));

    //Verifier verifies the proof
    let disclosed_messages = get_messages(&messages, &disclosed_indexes)?;

    log::info!("Proof of Knowledge of the Signature verification...");
    let proof_result = proof.verify(
        issuer_pk,
        &generators,
        Some(&header),
        Some(&nonce_verifier),
        &disclosed_messages,
        &disclosed_indexes,
    );
    assert!(
        proof_result,
        "Proof of Knowledge of the Signature Verification Failed!"
    );
    log::info!("Proof of Knowledge of the Signature is VALID!");

    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    let result = match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            bbs_main::<Bls12381Sha256>()
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            bbs_main::<Bls12381Shake256>()
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
            return;
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
    }
}
