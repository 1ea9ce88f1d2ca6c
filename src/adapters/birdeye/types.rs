//! BirdEye API wire types

use serde::Deserialize;

use crate::domain::TokenRecord;

/// `/defi/tokenlist` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct TokenListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<TokenListData>,
    /// Present on rejected requests (bad key, bad params)
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenListData {
    #[serde(default)]
    pub tokens: Vec<BirdeyeToken>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One token in the list
#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyeToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    /// Market cap in USD
    #[serde(default)]
    pub mc: Option<f64>,
    #[serde(rename = "v24hUSD", default)]
    pub v24h_usd: Option<f64>,
    #[serde(rename = "v24hChangePercent", default)]
    pub v24h_change_percent: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<f64>,
}

impl BirdeyeToken {
    /// Convert to a domain record. Entries without an address are dropped.
    pub fn into_record(self) -> Option<TokenRecord> {
        let address = self.address.filter(|a| !a.is_empty())?;
        Some(TokenRecord {
            address,
            symbol: self.symbol.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            market_cap: self.mc,
            volume_24h: self.v24h_usd,
            price: self.price,
            liquidity: self.liquidity,
        })
    }
}
