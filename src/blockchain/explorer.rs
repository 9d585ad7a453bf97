//! Block explorer links shown next to transactions and on the receive screen

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Explorer {
    base_url: String,
    cluster: String,
}

impl Explorer {
    pub fn new(base_url: &str, cluster: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cluster: cluster.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.explorer_base_url, &config.solana_cluster)
    }

    pub fn transaction_url(&self, signature: &str) -> String {
        self.link("tx", signature)
    }

    pub fn address_url(&self, address: &str) -> String {
        self.link("address", address)
    }

    fn link(&self, kind: &str, id: &str) -> String {
        // mainnet is the explorer default and takes no cluster parameter
        if self.cluster.is_empty() || self.cluster == "mainnet-beta" {
            format!("{}/{}/{}", self.base_url, kind, id)
        } else {
            format!("{}/{}/{}?cluster={}", self.base_url, kind, id, self.cluster)
        }
    }
}
