//! Persona tag types for behavioral wallet classification.

use serde::{Deserialize, Serialize};

/// Behavioral persona tag assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaTag {
    /// Whale: Very large total net worth.
    /// Signals: portfolio value above the whale floor.
    Whale,

    /// Degen: High risk appetite combined with high activity.
    /// Signals: elevated risk score plus elevated activity score.
    Degen,

    /// DeFi Power User: Active across several DeFi protocols.
    /// Signals: positions in multiple distinct protocols.
    DefiPowerUser,

    /// NFT Collector: Holds NFTs across many collections.
    /// Signals: distinct collection count above the collector floor.
    NftCollector,

    /// Hodler: Meaningful holdings with very little trading.
    /// Signals: low activity score while net worth stays above the dust floor.
    Hodler,

    /// New or Inactive: No observed activity and near-zero holdings.
    NewOrInactive,
}

impl PersonaTag {
    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            PersonaTag::Whale => "Whale",
            PersonaTag::Degen => "Degen",
            PersonaTag::DefiPowerUser => "DeFi Power User",
            PersonaTag::NftCollector => "NFT Collector",
            PersonaTag::Hodler => "Hodler",
            PersonaTag::NewOrInactive => "New or Inactive",
        }
    }

    /// Get tag description.
    pub fn description(&self) -> &'static str {
        match self {
            PersonaTag::Whale => "Holds a very large portfolio by total net worth",
            PersonaTag::Degen => "Trades frequently with a high appetite for risk",
            PersonaTag::DefiPowerUser => "Deploys capital across several DeFi protocols",
            PersonaTag::NftCollector => "Collects NFTs across many distinct collections",
            PersonaTag::Hodler => "Holds meaningful value with very little trading",
            PersonaTag::NewOrInactive => "Shows no on-chain activity and near-zero holdings",
        }
    }

    /// Get all tags in classifier evaluation order.
    pub fn all() -> &'static [PersonaTag] {
        &[
            PersonaTag::Whale,
            PersonaTag::Degen,
            PersonaTag::DefiPowerUser,
            PersonaTag::NftCollector,
            PersonaTag::Hodler,
            PersonaTag::NewOrInactive,
        ]
    }
}

impl std::fmt::Display for PersonaTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(PersonaTag::Whale.name(), "Whale");
        assert_eq!(PersonaTag::DefiPowerUser.name(), "DeFi Power User");
        assert_eq!(PersonaTag::NewOrInactive.name(), "New or Inactive");
    }

    #[test]
    fn test_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&PersonaTag::DefiPowerUser).unwrap(),
            "\"defi_power_user\""
        );
        assert_eq!(
            serde_json::to_string(&PersonaTag::NewOrInactive).unwrap(),
            "\"new_or_inactive\""
        );
        let tag: PersonaTag = serde_json::from_str("\"nft_collector\"").unwrap();
        assert_eq!(tag, PersonaTag::NftCollector);
    }

    #[test]
    fn test_all_tags_listed() {
        assert_eq!(PersonaTag::all().len(), 6);
        assert_eq!(PersonaTag::all()[0], PersonaTag::Whale);
    }
}
