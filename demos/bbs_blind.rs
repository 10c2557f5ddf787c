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
    bbs::{
        blind::{blind_sign, unblind_signature, verify_blind_signature},
        ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256},
        commitment::create_commitment,
    },
    config::BbsConfig,
    errors::Error,
    BBSKeyPair, BBSProof,
};
use std::env;

fn bbs_blind_main<CS: BbsCiphersuite>() -> Result<(), Error> {
    const HIDDEN_MSGS: [&str; 2] = ["holder-secret-key", "holder-date-of-birth"];
    const KNOWN_MSGS: [&str; 2] = ["issuer: example university", "degree: computer science"];
    let header = b"blind-demo-header";

    let generators = BbsConfig::new(10, "bbs-blind-demo")?.generators::<CS>()?;

    log::info!("Keypair Generation");
    let issuer_keypair = BBSKeyPair::generate::<CS>(None, None);
    let issuer_sk = issuer_keypair.private_key();
    let issuer_pk = issuer_keypair.public_key();
    log::info!("PK: {}", issuer_pk.encode());

    //Holder commits to the hidden messages
    log::info!("Commitment Computation...");
    let (commitment, commitment_proof) = create_commitment(&HIDDEN_MSGS, None, &generators)?;
    log::info!(
        "Commitment: {}",
        hex::encode(&commitment.to_bytes()[..48])
    );
    log::info!("Commitment Proof: {}", hex::encode(commitment_proof.to_bytes()));

    //Issuer checks the commitment proof and signs
    log::info!("Blind Signature Computation...");
    let blind_signature = blind_sign(
        issuer_sk,
        &commitment,
        &KNOWN_MSGS,
        &commitment_proof,
        &generators,
        Some(header),
    )?;

    //Holder unblinds and verifies
    let signature = unblind_signature(blind_signature);
    log::info!("Signature: {}", hex::encode(signature.to_bytes()));
    assert!(
        verify_blind_signature(
            issuer_pk,
            &signature,
            &commitment,
            &KNOWN_MSGS,
            &generators,
            Some(header)
        ),
        "Blind Signature verification FAILED!"
    );
    log::info!("Blind Signature is VALID");

    //Holder proves possession disclosing only the issuer
    let digest = commitment.digest::<CS>();
    let signed_messages: Vec<&[u8]> = vec![
        &digest[..],
        KNOWN_MSGS[0].as_bytes(),
        KNOWN_MSGS[1].as_bytes(),
    ];
    let disclosed_indexes = [1usize];

    log::info!("Proof of Knowledge of the Signature Generation...");
    let proof = BBSProof::generate(
        issuer_pk,
        &signature,
        &generators,
        Some(header),
        Some(b"verifier-nonce"),
        &signed_messages,
        &disclosed_indexes,
    )?;

    log::info!("Proof of Knowledge of the Signature verification...");
    assert!(
        proof.verify(
            issuer_pk,
            &generators,
            Some(header),
            Some(b"verifier-nonce"),
            &[KNOWN_MSGS[0]],
            &disclosed_indexes
        ),
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
            bbs_blind_main::<Bls12381Sha256>()
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            bbs_blind_main::<Bls12381Shake256>()
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
