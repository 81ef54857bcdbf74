//! Category listing filter/sort pipeline.
//!
//! A listing is produced in four steps, each of which only narrows or
//! reorders the previous result:
//!
//! 1. category scope ([`CategorySelector`])
//! 2. price buckets, matched as a union ([`PriceBucket`])
//! 3. colors, matched as a union
//! 4. ordering ([`SortKey`])
//!
//! An empty selection for a dimension means "no constraint". The input slice
//! is never modified; the result is a fresh list of references into it.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use solestore_core::{Category, CategoryParseError};

use crate::models::Product;

/// Errors from parsing filter selections out of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error(transparent)]
    Category(#[from] CategoryParseError),

    #[error("unknown price range: {0}")]
    UnknownPriceRange(String),
}

/// Which part of the catalog a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelector {
    /// The catch-all "all shoes" listing.
    #[default]
    All,
    Only(Category),
}

impl CategorySelector {
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }

    /// Page heading for the listing.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "All Shoes",
            Self::Only(category) => category.title(),
        }
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl FromStr for CategorySelector {
    type Err = FilterParseError;

    /// `all`, `shoes` or an empty string select everything; otherwise the
    /// input must name a [`Category`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "shoes" => Ok(Self::All),
            other => Ok(Self::Only(other.parse()?)),
        }
    }
}

/// A half-open price interval used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBucket {
    /// `price < 75`
    Under75,
    /// `75 <= price < 125`
    From75To125,
    /// `125 <= price < 175`
    From125To175,
    /// `price >= 175`
    Over175,
}

impl PriceBucket {
    /// All buckets in display order.
    pub const ALL: [Self; 4] = [
        Self::Under75,
        Self::From75To125,
        Self::From125To175,
        Self::Over175,
    ];

    /// Selection value (`under-75`, `75-125`, `125-175`, `over-175`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under75 => "under-75",
            Self::From75To125 => "75-125",
            Self::From125To175 => "125-175",
            Self::Over175 => "over-175",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under75 => "Under $75",
            Self::From75To125 => "$75 - $125",
            Self::From125To175 => "$125 - $175",
            Self::Over175 => "Over $175",
        }
    }

    /// Inclusive lower and exclusive upper bound.
    #[must_use]
    pub fn bounds(self) -> (Option<Decimal>, Option<Decimal>) {
        let (lo, hi) = match self {
            Self::Under75 => (None, Some(75)),
            Self::From75To125 => (Some(75), Some(125)),
            Self::From125To175 => (Some(125), Some(175)),
            Self::Over175 => (Some(175), None),
        };
        (lo.map(Decimal::from), hi.map(Decimal::from))
    }

    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let (lo, hi) = self.bounds();
        lo.is_none_or(|lo| price >= lo) && hi.is_none_or(|hi| price < hi)
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBucket {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s.trim())
            .ok_or_else(|| FilterParseError::UnknownPriceRange(s.to_owned()))
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    /// New arrivals first, otherwise catalog order.
    Newest,
}

impl SortKey {
    pub const ALL: [Self; 4] = [
        Self::Featured,
        Self::PriceLowHigh,
        Self::PriceHighLow,
        Self::Newest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::Newest => "newest",
        }
    }

    /// Parse a sort key; anything unrecognized falls back to `Featured`.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .unwrap_or_default()
    }

    fn apply(self, products: &mut Vec<&Product>) {
        match self {
            Self::Featured => {}
            // `sort_by` is stable, so equal prices keep catalog order.
            Self::PriceLowHigh => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHighLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Newest => {
                let (mut fresh, rest): (Vec<_>, Vec<_>) =
                    products.drain(..).partition(|p| p.is_new);
                fresh.extend(rest);
                *products = fresh;
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        Self::parse_lenient(s)
    }
}

/// Interactive filter state for a category listing.
///
/// Selections keep the order they were toggled on in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilters {
    sort: SortKey,
    price_ranges: Vec<PriceBucket>,
    colors: Vec<String>,
}

impl CategoryFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, bucket: PriceBucket) -> Self {
        if !self.price_ranges.contains(&bucket) {
            self.price_ranges.push(bucket);
        }
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        if !self.colors.contains(&color) {
            self.colors.push(color);
        }
        self
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn price_ranges(&self) -> &[PriceBucket] {
        &self.price_ranges
    }

    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Whether any price or color constraint is active.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !self.price_ranges.is_empty() || !self.colors.is_empty()
    }

    pub const fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Select `bucket` if unselected, otherwise deselect it.
    pub fn toggle_price_range(&mut self, bucket: PriceBucket) {
        if let Some(pos) = self.price_ranges.iter().position(|b| *b == bucket) {
            self.price_ranges.remove(pos);
        } else {
            self.price_ranges.push(bucket);
        }
    }

    /// Select `color` if unselected, otherwise deselect it.
    pub fn toggle_color(&mut self, color: &str) {
        if let Some(pos) = self.colors.iter().position(|c| c == color) {
            self.colors.remove(pos);
        } else {
            self.colors.push(color.to_owned());
        }
    }

    /// Clear price and color selections. The sort key is kept.
    pub fn reset(&mut self) {
        self.price_ranges.clear();
        self.colors.clear();
    }

    /// Run the pipeline over `products`.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product], selector: CategorySelector) -> Vec<&'a Product> {
        let mut result: Vec<&Product> = products
            .iter()
            .filter(|p| selector.matches(p))
            .filter(|p| {
                self.price_ranges.is_empty()
                    || self.price_ranges.iter().any(|b| b.contains(p.price))
            })
            .filter(|p| self.colors.is_empty() || p.has_any_color(self.colors.as_slice()))
            .collect();

        self.sort.apply(&mut result);

        tracing::debug!(
            selector = selector.title(),
            sort = %self.sort,
            matched = result.len(),
            "Filtered catalog"
        );
        result
    }
}
