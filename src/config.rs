use alloy_primitives::{Address, address};
use serde::Deserialize;

/// Deployment parameters of the indexer.
///
/// `Default` is the Ethereum mainnet deployment. A TOML document only needs to
/// list the keys that differ from it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Wrapped native token every USD price is bootstrapped from.
    pub weth_address: Address,
    pub weth_decimals: u32,
    /// The USD side of the reference pool.
    pub usd_reference_token: Address,
    pub usd_reference_decimals: u32,
    /// Reference USD/WETH pool read for the ETH price.
    pub usd_weth_reference_pool: Address,
    /// Stable tokens in the order they are tried by the price oracle.
    pub stable_tokens: Vec<Address>,
    /// Fee tiers (hundredths of a bip) searched in order when looking up a pool.
    pub fee_tiers: Vec<u32>,
    /// Blocks before this one are backfilled on an hourly cadence.
    pub start_process_block: u64,
    pub block_amount_per_minute: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            weth_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            weth_decimals: 18,
            usd_reference_token: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            usd_reference_decimals: 6,
            usd_weth_reference_pool: address!("8ad599c3a0ff1de082011efddc58f1908eb6e6d8"),
            stable_tokens: vec![
                address!("6b175474e89094c44da98b954eedeac495271d0f"), // DAI
                address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"), // USDC
                address!("dac17f958d2ee523a2206206994597c13d831ec7"), // USDT
            ],
            fee_tiers: vec![500, 3000, 10000],
            start_process_block: 13_000_000,
            block_amount_per_minute: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidToml(String),
    NoFeeTiers,
    ZeroBlockRate,
}

impl IndexerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: IndexerConfig =
            toml::from_str(source).map_err(|e| ConfigError::InvalidToml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fee_tiers.is_empty() {
            return Err(ConfigError::NoFeeTiers);
        }
        if self.block_amount_per_minute == 0 {
            return Err(ConfigError::ZeroBlockRate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_mainnet_default() {
        assert_eq!(
            IndexerConfig::from_toml_str("").unwrap(),
            IndexerConfig::default()
        );
    }

    #[test]
    fn overrides_only_listed_keys() {
        let config = IndexerConfig::from_toml_str(
            r#"
            weth_address = "0x4200000000000000000000000000000000000006"
            fee_tiers = [100, 500]
            block_amount_per_minute = 30
            "#,
        )
        .unwrap();

        assert_eq!(
            config.weth_address,
            address!("4200000000000000000000000000000000000006")
        );
        assert_eq!(config.fee_tiers, vec![100, 500]);
        assert_eq!(config.block_amount_per_minute, 30);
        assert_eq!(config.stable_tokens, IndexerConfig::default().stable_tokens);
    }

    #[test]
    fn rejects_empty_fee_tiers() {
        assert_eq!(
            IndexerConfig::from_toml_str("fee_tiers = []"),
            Err(ConfigError::NoFeeTiers)
        );
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            IndexerConfig::from_toml_str("weth_address = 12"),
            Err(ConfigError::InvalidToml(_))
        ));
    }
}
