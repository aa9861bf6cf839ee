//! Assertions on the static configuration section.

use crate::error::Result;
use crate::plan::Configuration;

use super::config_variable::ConfigVariableAssert;
use super::lookup::{Collection, resolve_named};
use super::provider::ProviderAssert;

/// Accessor over `configuration`.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationAssert<'a> {
    configuration: &'a Configuration,
}

impl<'a> ConfigurationAssert<'a> {
    pub(crate) const fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    /// Looks up a provider block by name.
    ///
    /// # Errors
    ///
    /// Fails if there is no provider configuration or none named `name`.
    pub fn provider(&self, name: &str) -> Result<ProviderAssert<'a>> {
        let (name, provider) = resolve_named(
            self.configuration.provider_config.as_ref(),
            name,
            Collection::Providers,
        )?;
        Ok(ProviderAssert::new(name, provider))
    }

    /// Looks up a variable declared in the root module.
    ///
    /// # Errors
    ///
    /// Fails if the root module declares no variables or none named `name`.
    pub fn variable(&self, name: &str) -> Result<ConfigVariableAssert<'a>> {
        let variables = self
            .configuration
            .root_module
            .as_ref()
            .and_then(|m| m.variables.as_ref());
        let (name, declaration) = resolve_named(variables, name, Collection::ConfigVariables)?;
        Ok(ConfigVariableAssert::new(name, declaration))
    }
}
