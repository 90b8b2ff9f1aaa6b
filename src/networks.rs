// Network registry
//
// Closed mapping network -> (chainId, Safe Transaction Service base URL).
// Chain ids are fixed per network and never derived.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Networks with a hosted Safe Transaction Service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Arbitrum,
    Aurora,
    Avalanche,
    Base,
    BaseSepolia,
    Blast,
    Bsc,
    Celo,
    Ethereum,
    Gnosis,
    GnosisChiado,
    Linea,
    Mantle,
    Optimism,
    Polygon,
    PolygonZkevm,
    Scroll,
    Sepolia,
    Worldchain,
    Xlayer,
    Zksync,
    Zora,
}

impl Network {
    /// Every supported network, in display order
    pub const ALL: [Network; 22] = [
        Network::Arbitrum,
        Network::Aurora,
        Network::Avalanche,
        Network::Base,
        Network::BaseSepolia,
        Network::Blast,
        Network::Bsc,
        Network::Celo,
        Network::Ethereum,
        Network::Gnosis,
        Network::GnosisChiado,
        Network::Linea,
        Network::Mantle,
        Network::Optimism,
        Network::Polygon,
        Network::PolygonZkevm,
        Network::Scroll,
        Network::Sepolia,
        Network::Worldchain,
        Network::Xlayer,
        Network::Zksync,
        Network::Zora,
    ];

    /// CLI / display name
    pub const fn name(self) -> &'static str {
        match self {
            Network::Arbitrum => "arbitrum",
            Network::Aurora => "aurora",
            Network::Avalanche => "avalanche",
            Network::Base => "base",
            Network::BaseSepolia => "base-sepolia",
            Network::Blast => "blast",
            Network::Bsc => "bsc",
            Network::Celo => "celo",
            Network::Ethereum => "ethereum",
            Network::Gnosis => "gnosis",
            Network::GnosisChiado => "gnosis-chiado",
            Network::Linea => "linea",
            Network::Mantle => "mantle",
            Network::Optimism => "optimism",
            Network::Polygon => "polygon",
            Network::PolygonZkevm => "polygon-zkevm",
            Network::Scroll => "scroll",
            Network::Sepolia => "sepolia",
            Network::Worldchain => "worldchain",
            Network::Xlayer => "xlayer",
            Network::Zksync => "zksync",
            Network::Zora => "zora",
        }
    }

    /// EIP-155 chain id
    pub const fn chain_id(self) -> u64 {
        match self {
            Network::Arbitrum => 42161,
            Network::Aurora => 1313161554,
            Network::Avalanche => 43114,
            Network::Base => 8453,
            Network::BaseSepolia => 84532,
            Network::Blast => 81457,
            Network::Bsc => 56,
            Network::Celo => 42220,
            Network::Ethereum => 1,
            Network::Gnosis => 100,
            Network::GnosisChiado => 10200,
            Network::Linea => 59144,
            Network::Mantle => 5000,
            Network::Optimism => 10,
            Network::Polygon => 137,
            Network::PolygonZkevm => 1101,
            Network::Scroll => 534352,
            Network::Sepolia => 11155111,
            Network::Worldchain => 480,
            Network::Xlayer => 196,
            Network::Zksync => 324,
            Network::Zora => 7777777,
        }
    }

    /// Base URL of the hosted Safe Transaction Service
    pub const fn api_url(self) -> &'static str {
        match self {
            Network::Arbitrum => "https://safe-transaction-arbitrum.safe.global",
            Network::Aurora => "https://safe-transaction-aurora.safe.global",
            Network::Avalanche => "https://safe-transaction-avalanche.safe.global",
            Network::Base => "https://safe-transaction-base.safe.global",
            Network::BaseSepolia => "https://safe-transaction-base-sepolia.safe.global",
            Network::Blast => "https://safe-transaction-blast.safe.global",
            Network::Bsc => "https://safe-transaction-bsc.safe.global",
            Network::Celo => "https://safe-transaction-celo.safe.global",
            Network::Ethereum => "https://safe-transaction-mainnet.safe.global",
            Network::Gnosis => "https://safe-transaction-gnosis-chain.safe.global",
            Network::GnosisChiado => "https://safe-transaction-chiado.safe.global",
            Network::Linea => "https://safe-transaction-linea.safe.global",
            Network::Mantle => "https://safe-transaction-mantle.safe.global",
            Network::Optimism => "https://safe-transaction-optimism.safe.global",
            Network::Polygon => "https://safe-transaction-polygon.safe.global",
            Network::PolygonZkevm => "https://safe-transaction-zkevm.safe.global",
            Network::Scroll => "https://safe-transaction-scroll.safe.global",
            Network::Sepolia => "https://safe-transaction-sepolia.safe.global",
            Network::Worldchain => "https://safe-transaction-worldchain.safe.global",
            Network::Xlayer => "https://safe-transaction-xlayer.safe.global",
            Network::Zksync => "https://safe-transaction-zksync.safe.global",
            Network::Zora => "https://safe-transaction-zora.safe.global",
        }
    }

    /// Reverse lookup by chain id
    pub fn from_chain_id(chain_id: u64) -> Option<Network> {
        Network::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported network: {0}")]
pub struct UnsupportedNetwork(pub String);

impl FromStr for Network {
    type Err = UnsupportedNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Network::ALL
            .into_iter()
            .find(|n| n.name() == wanted)
            .ok_or(UnsupportedNetwork(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_chain_ids_unique() {
        let ids: HashSet<u64> = Network::ALL.iter().map(|n| n.chain_id()).collect();
        assert_eq!(ids.len(), Network::ALL.len());
    }

    #[test]
    fn test_from_chain_id_roundtrip() {
        for network in Network::ALL {
            assert_eq!(Network::from_chain_id(network.chain_id()), Some(network));
        }
        assert_eq!(Network::from_chain_id(999_999_999), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ethereum".parse::<Network>().unwrap(), Network::Ethereum);
        assert_eq!("Base-Sepolia".parse::<Network>().unwrap(), Network::BaseSepolia);
        assert!("mainnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_well_known_chain_ids() {
        assert_eq!(Network::Ethereum.chain_id(), 1);
        assert_eq!(Network::Sepolia.chain_id(), 11155111);
        assert_eq!(Network::Polygon.chain_id(), 137);
    }

    #[test]
    fn test_api_urls_are_https() {
        for network in Network::ALL {
            assert!(network.api_url().starts_with("https://safe-transaction-"));
            assert!(!network.api_url().ends_with('/'));
        }
    }

    #[test]
    fn test_clap_names_match_display() {
        use clap::ValueEnum;

        for network in Network::ALL {
            let value = network.to_possible_value().unwrap();
            assert_eq!(value.get_name(), network.name());
        }
    }
}
