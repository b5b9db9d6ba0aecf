// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Chain descriptions and deployment target resolution.

use crate::blockchain::ChainError;
use crate::error::ProvisionError;

/// A known blockchain network.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Network name for display and matching.
    pub name: &'static str,
    /// Chain ID.
    pub chain_id: u64,
    /// Public RPC endpoint URL.
    pub rpc_url: &'static str,
    /// Block explorer URL.
    pub explorer_url: &'static str,
}

/// Ethereum mainnet.
pub const ETHEREUM: ChainConfig = ChainConfig {
    name: "Ethereum",
    chain_id: 1,
    rpc_url: "https://cloudflare-eth.com",
    explorer_url: "https://etherscan.io",
};

/// Binance Smart Chain mainnet.
pub const BINANCE_SMART_CHAIN: ChainConfig = ChainConfig {
    name: "Binance Smart Chain",
    chain_id: 56,
    rpc_url: "https://bsc-dataseed.binance.org",
    explorer_url: "https://bscscan.com",
};

/// Avalanche C-Chain mainnet.
pub const AVALANCHE: ChainConfig = ChainConfig {
    name: "Avalanche",
    chain_id: 43114,
    rpc_url: "https://api.avax.network/ext/bc/C/rpc",
    explorer_url: "https://snowtrace.io",
};

/// Fantom Opera mainnet.
pub const FANTOM: ChainConfig = ChainConfig {
    name: "Fantom",
    chain_id: 250,
    rpc_url: "https://rpc.ftm.tools",
    explorer_url: "https://ftmscan.com",
};

/// Chains resolvable by (name, id) without an explicit RPC URL.
pub const KNOWN_CHAINS: [ChainConfig; 4] = [ETHEREUM, BINANCE_SMART_CHAIN, AVALANCHE, FANTOM];

/// Where a transaction should be submitted.
///
/// Either an explicit RPC endpoint (locally hosted test chains) or a named
/// public network resolved through [`KNOWN_CHAINS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainTarget {
    Rpc(String),
    Named { name: String, chain_id: u64 },
}

impl ChainTarget {
    /// Build a target from the request properties.
    ///
    /// Precondition: either an RPC URL, or both a chain name and numeric id.
    /// Anything less fails with `AmbiguousChainTarget` before any network
    /// call is attempted.
    pub fn from_properties(
        rpc_url: Option<String>,
        chain_name: Option<String>,
        chain_id: Option<u64>,
    ) -> Result<Self, ProvisionError> {
        if let Some(url) = rpc_url {
            return Ok(ChainTarget::Rpc(url));
        }
        match (chain_name, chain_id) {
            (Some(name), Some(chain_id)) => Ok(ChainTarget::Named { name, chain_id }),
            _ => Err(ProvisionError::AmbiguousChainTarget),
        }
    }

    /// Resolve the RPC endpoint for this target.
    pub fn rpc_url(&self) -> Result<url::Url, ChainError> {
        let raw = match self {
            ChainTarget::Rpc(url) => url.clone(),
            ChainTarget::Named { name, chain_id } => KNOWN_CHAINS
                .iter()
                .find(|chain| chain.chain_id == *chain_id)
                .map(|chain| chain.rpc_url.to_string())
                .ok_or_else(|| ChainError::UnknownChain {
                    name: name.clone(),
                    chain_id: *chain_id,
                })?,
        };
        raw.parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_rpc_url_wins() {
        let target = ChainTarget::from_properties(
            Some("http://127.0.0.1:8545".to_string()),
            Some("Ethereum".to_string()),
            Some(1),
        )
        .unwrap();
        assert_eq!(target, ChainTarget::Rpc("http://127.0.0.1:8545".to_string()));
        assert_eq!(target.rpc_url().unwrap().as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn name_and_id_resolve_through_the_table() {
        let target =
            ChainTarget::from_properties(None, Some("Avalanche".to_string()), Some(43114)).unwrap();
        assert_eq!(
            target.rpc_url().unwrap().as_str(),
            "https://api.avax.network/ext/bc/C/rpc"
        );
    }

    #[test]
    fn missing_id_or_name_is_ambiguous() {
        assert!(matches!(
            ChainTarget::from_properties(None, Some("Ethereum".to_string()), None),
            Err(ProvisionError::AmbiguousChainTarget)
        ));
        assert!(matches!(
            ChainTarget::from_properties(None, None, Some(1)),
            Err(ProvisionError::AmbiguousChainTarget)
        ));
        assert!(matches!(
            ChainTarget::from_properties(None, None, None),
            Err(ProvisionError::AmbiguousChainTarget)
        ));
    }

    #[test]
    fn unknown_named_chain_fails_before_any_network_call() {
        let target = ChainTarget::Named {
            name: "Testnet".to_string(),
            chain_id: 99999,
        };
        assert!(matches!(
            target.rpc_url(),
            Err(ChainError::UnknownChain { chain_id: 99999, .. })
        ));
    }
}
