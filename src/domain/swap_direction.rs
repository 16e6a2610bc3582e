//! Direction of a swap through an asset/stable pool.

use core::fmt;

/// Which side of the pool the trader sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Sell asset, receive stable. Lowers the spot price.
    AssetToStable,
    /// Sell stable, receive asset. Raises the spot price.
    StableToAsset,
}

impl SwapDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::AssetToStable => Self::StableToAsset,
            Self::StableToAsset => Self::AssetToStable,
        }
    }

    /// Returns `true` when the asset reserve is the input side.
    #[must_use]
    pub const fn sells_asset(&self) -> bool {
        matches!(self, Self::AssetToStable)
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetToStable => f.write_str("asset->stable"),
            Self::StableToAsset => f.write_str("stable->asset"),
        }
    }
}
