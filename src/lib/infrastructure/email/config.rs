//! Email provider configuration

use std::{str::FromStr, sync::Arc};

use clap::Parser;
use thiserror::Error;

use crate::{
    domain::communication::{
        credentials::Credential, delivery::ConfiguredProvider, errors::CredentialError,
    },
    infrastructure::{
        email::providers::{Provider, ProviderAdapter, UnknownProvider},
        outbound::HttpClient,
    },
};

/// Email provider configuration
#[derive(Clone, Debug, Default, Parser)]
pub struct EmailProvidersConfig {
    /// Providers to relay through, in order, as `name:secret`. Mailjet takes
    /// `mailjet:public_key:private_key`.
    #[clap(
        long = "email-provider",
        env = "EMAIL_PROVIDERS",
        value_delimiter = ','
    )]
    pub providers: Vec<ProviderEntry>,
}

impl EmailProvidersConfig {
    /// Builds the ordered provider list, all sending through `http`.
    pub fn configured<H: HttpClient>(&self, http: H) -> Vec<ConfiguredProvider> {
        self.providers
            .iter()
            .map(|entry| {
                ConfiguredProvider::new(
                    Arc::new(ProviderAdapter::new(entry.provider, http.clone())),
                    entry.credential.clone(),
                )
            })
            .collect()
    }
}

/// One configured provider and its credential
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEntry {
    /// The provider
    pub provider: Provider,

    /// Its credential
    pub credential: Credential,
}

/// Errors that can occur when parsing a [`ProviderEntry`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderEntryError {
    /// No `:` between name and secret
    #[error("expected \"name:secret\"")]
    MissingSecret,

    /// The name is not a known provider
    #[error(transparent)]
    UnknownProvider(#[from] UnknownProvider),

    /// The secret does not fit the provider
    #[error("invalid credential for {provider}: {source}")]
    InvalidCredential {
        /// The provider
        provider: Provider,

        /// Why the secret was refused
        source: CredentialError,
    },
}

impl FromStr for ProviderEntry {
    type Err = ProviderEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, secret) = s
            .trim()
            .split_once(':')
            .ok_or(ProviderEntryError::MissingSecret)?;

        let provider: Provider = name.parse()?;

        let credential = provider
            .credential(secret)
            .map_err(|source| ProviderEntryError::InvalidCredential { provider, source })?;

        Ok(Self {
            provider,
            credential,
        })
    }
}
