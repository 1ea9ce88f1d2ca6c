//! GeckoTerminal API wire types
//!
//! Numeric attributes arrive as decimal strings (`"12345.67"`), occasionally
//! as numbers or null; all are parsed leniently.

use serde::{Deserialize, Deserializer};

use crate::domain::PoolRecord;

/// `/networks/{network}/tokens/{address}/pools` response
#[derive(Debug, Clone, Deserialize)]
pub struct PoolsResponse {
    #[serde(default)]
    pub data: Vec<PoolData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolData {
    #[serde(default)]
    pub id: Option<String>,
    pub attributes: PoolAttributes,
    #[serde(default)]
    pub relationships: Option<PoolRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolAttributes {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reserve_in_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub base_token_price_usd: Option<f64>,
    #[serde(default)]
    pub volume_usd: Option<VolumeUsd>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeUsd {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolRelationships {
    #[serde(default)]
    pub dex: Option<RelationshipRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipRef {
    pub data: RelationshipData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipData {
    pub id: String,
}

impl PoolData {
    /// Convert to a domain record. Pools without an address are dropped.
    ///
    /// The DEX id comes from `attributes.dex_id` when present, otherwise
    /// from `relationships.dex`, otherwise `"unknown"`.
    pub fn into_record(self) -> Option<PoolRecord> {
        let PoolData {
            attributes: attrs,
            relationships,
            ..
        } = self;

        let dex = attrs
            .dex_id
            .or_else(|| relationships.and_then(|r| r.dex).map(|d| d.data.id))
            .unwrap_or_else(|| "unknown".to_string());

        let pool_address = attrs.address.filter(|a| !a.is_empty())?;

        Some(PoolRecord {
            pool_address,
            dex,
            liquidity_usd: attrs.reserve_in_usd.unwrap_or(0.0),
            volume_24h_usd: attrs.volume_usd.and_then(|v| v.h24).unwrap_or(0.0),
            price_usd: attrs.base_token_price_usd.unwrap_or(0.0),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrString::Number(v)) => Some(v),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}
