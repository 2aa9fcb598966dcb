//! Enumerated product attributes.
//!
//! Serde uses the exact labels of the catalog data file (`"Best Seller"`,
//! `"inStock"`). `FromStr` is more forgiving so query strings and CLI flags
//! can say `best-seller` or `in_stock`.

use serde::{Deserialize, Serialize};

/// Lowercase a label and drop word separators: `"Best Seller"` -> `"bestseller"`.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Who a fragrance is marketed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Unisex,
    Men,
    Women,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Unisex, Self::Men, Self::Women];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unisex => "Unisex",
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "unisex" => Ok(Self::Unisex),
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            _ => Err(format!("invalid gender: {s}")),
        }
    }
}

/// Merchandising tag shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    New,
    #[serde(rename = "Best Seller")]
    BestSeller,
    #[serde(rename = "Limited Edition")]
    LimitedEdition,
}

impl Badge {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::BestSeller => "Best Seller",
            Self::LimitedEdition => "Limited Edition",
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Badge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "new" => Ok(Self::New),
            "bestseller" => Ok(Self::BestSeller),
            "limitededition" => Ok(Self::LimitedEdition),
            _ => Err(format!("invalid badge: {s}")),
        }
    }
}

/// Fragrance family, used for filtering and related-product matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragranceFamily {
    Floral,
    Oriental,
    Citrus,
    Woody,
    Gourmand,
    Fresh,
    Aquatic,
}

impl FragranceFamily {
    /// Every family, in the order the shop filter lists them.
    pub const ALL: [Self; 7] = [
        Self::Floral,
        Self::Oriental,
        Self::Citrus,
        Self::Woody,
        Self::Gourmand,
        Self::Fresh,
        Self::Aquatic,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Floral => "Floral",
            Self::Oriental => "Oriental",
            Self::Citrus => "Citrus",
            Self::Woody => "Woody",
            Self::Gourmand => "Gourmand",
            Self::Fresh => "Fresh",
            Self::Aquatic => "Aquatic",
        }
    }
}

impl std::fmt::Display for FragranceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FragranceFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("invalid fragrance family: {s}"))
    }
}

/// Stock constraint applied by the availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl Availability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InStock => "inStock",
            Self::OutOfStock => "outOfStock",
        }
    }

    /// Whether a product with the given stock flag passes.
    #[must_use]
    pub const fn admits(self, in_stock: bool) -> bool {
        match self {
            Self::All => true,
            Self::InStock => in_stock,
            Self::OutOfStock => !in_stock,
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" | "" => Ok(Self::All),
            "instock" => Ok(Self::InStock),
            "outofstock" => Ok(Self::OutOfStock),
            _ => Err(format!("invalid availability: {s}")),
        }
    }
}
