//! # Configuration State
//!
//! Client configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BAZAAR_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization.

use bazaar_core::{Money, MAX_CART_ITEMS};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ClientError, ClientResult};

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientConfig {
    /// Marketplace name (used in payment order names)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Where the symbol goes relative to the amount
    pub symbol_position: SymbolPosition,

    /// Maximum line items in the cart
    pub max_cart_items: usize,
}

/// Placement of the currency symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SymbolPosition {
    /// `$48,000`
    Prefix,
    /// `48,000원`
    #[default]
    Suffix,
}

impl std::str::FromStr for SymbolPosition {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefix" | "before" => Ok(SymbolPosition::Prefix),
            "suffix" | "after" => Ok(SymbolPosition::Suffix),
            other => Err(ClientError::config(format!(
                "Unknown symbol position: '{}'. Valid options: prefix, suffix",
                other
            ))),
        }
    }
}

impl Default for ClientConfig {
    /// Development defaults: KRW-style suffix symbol, default cart capacity.
    fn default() -> Self {
        ClientConfig {
            store_name: "Bazaar".to_string(),
            currency_symbol: "원".to_string(),
            symbol_position: SymbolPosition::Suffix,
            max_cart_items: MAX_CART_ITEMS,
        }
    }
}

impl ClientConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BAZAAR_STORE_NAME`
    /// - `BAZAAR_CURRENCY_SYMBOL`
    /// - `BAZAAR_CURRENCY_POSITION` (`prefix` | `suffix`)
    /// - `BAZAAR_MAX_CART_ITEMS` (1 or more)
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(store_name) = lookup("BAZAAR_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("BAZAAR_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(position) = lookup("BAZAAR_CURRENCY_POSITION") {
            config.symbol_position = position.parse()?;
        }

        if let Some(max) = lookup("BAZAAR_MAX_CART_ITEMS") {
            config.max_cart_items = match max.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ClientError::config(format!(
                        "BAZAAR_MAX_CART_ITEMS must be a positive integer, got '{}'",
                        max
                    )))
                }
            };
        }

        Ok(config)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_client::ClientConfig;
    /// use bazaar_core::Money;
    ///
    /// let config = ClientConfig::default();
    /// assert_eq!(config.format_currency(Money::from_units(48_000)), "48,000원");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        match self.symbol_position {
            SymbolPosition::Prefix if amount.is_negative() => {
                format!("-{}{}", self.currency_symbol, Money::from_units(-amount.units()))
            }
            SymbolPosition::Prefix => format!("{}{}", self.currency_symbol, amount),
            SymbolPosition::Suffix => format!("{}{}", amount, self.currency_symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_suffix() {
        let config = ClientConfig::default();
        assert_eq!(config.format_currency(Money::from_units(48_000)), "48,000원");
        assert_eq!(config.format_currency(Money::zero()), "0원");
    }

    #[test]
    fn test_format_currency_prefix() {
        let config = ClientConfig {
            currency_symbol: "$".to_string(),
            symbol_position: SymbolPosition::Prefix,
            ..ClientConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_units(1_234)), "$1,234");
        assert_eq!(config.format_currency(Money::from_units(-500)), "-$500");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BAZAAR_STORE_NAME", "Flea"),
            ("BAZAAR_CURRENCY_SYMBOL", "$"),
            ("BAZAAR_CURRENCY_POSITION", "prefix"),
            ("BAZAAR_MAX_CART_ITEMS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Flea");
        assert_eq!(config.symbol_position, SymbolPosition::Prefix);
        assert_eq!(config.max_cart_items, 20);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("BAZAAR_MAX_CART_ITEMS", "0")])).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);

        let err = ClientConfig::from_lookup(lookup(&[("BAZAAR_CURRENCY_POSITION", "middle")])).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }
}
