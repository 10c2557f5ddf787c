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

//! Runtime parameters of a BBS deployment.

use crate::{
    bbs::{ciphersuites::BbsCiphersuite, generators::Generators},
    errors::Error,
};
use serde::{Deserialize, Serialize};

/// Deployment parameters: how many messages a signature can carry and the API
/// identifier that scopes generators and message hashing.
///
/// # Example
///
/// ```rust
/// use bbscore::{bbs::ciphersuites::Bls12381Sha256, config::BbsConfig};
///
/// let config = BbsConfig::from_json(r#"{ "max_messages": 8, "api_id": "my-app" }"#).unwrap();
/// let generators = config.generators::<Bls12381Sha256>().unwrap();
/// assert_eq!(generators.max_messages(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BbsConfig {
    /// Number of message generators to derive. Must be at least 1.
    pub max_messages: usize,
    pub api_id: String,
}

impl Default for BbsConfig {
    fn default() -> Self {
        Self {
            max_messages: 50,
            api_id: String::new(),
        }
    }
}

impl BbsConfig {
    pub fn new(max_messages: usize, api_id: &str) -> Result<Self, Error> {
        let config = Self {
            max_messages,
            api_id: api_id.to_owned(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON configuration. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_messages == 0 {
            return Err(Error::InvalidConfig(
                "max_messages must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Derives the generator set `[Q_1, H_1, ..., H_max_messages]` for this configuration.
    pub fn generators<CS: BbsCiphersuite>(&self) -> Result<Generators<CS>, Error> {
        self.validate()?;
        log::debug!(
            "deriving generators for api_id {:?} with max_messages {}",
            self.api_id,
            self.max_messages
        );
        Generators::create(self.max_messages, Some(self.api_id.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::ciphersuites::Bls12381Sha256;

    #[test]
    fn defaults() {
        let config = BbsConfig::default();
        assert_eq!(config.max_messages, 50);
        assert_eq!(config.api_id, "");
        assert_eq!(BbsConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn json_round_trip() {
        let config = BbsConfig::new(4, "app").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(BbsConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn zero_messages_is_invalid() {
        assert!(matches!(BbsConfig::new(0, ""), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            BbsConfig::from_json(r#"{ "max_messages": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            BbsConfig::from_json("not json"),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn generators_follow_the_config() {
        let config = BbsConfig::new(3, "app").unwrap();
        let generators = config.generators::<Bls12381Sha256>().unwrap();
        assert_eq!(generators.max_messages(), 3);
        assert_eq!(generators.api_id(), b"app");
        assert_eq!(
            generators,
            Generators::<Bls12381Sha256>::create(3, Some(b"app")).unwrap()
        );
    }
}
