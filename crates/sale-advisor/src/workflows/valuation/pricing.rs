use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Blended regional price used when a postal area has no dedicated data.
pub const REGIONAL_DEFAULT_PRICE_PER_SQFT: u32 = 185;
/// Upper bound on imported prices. Keeps `area * price` well inside `Decimal` range
/// for any `u32` living area.
pub const MAX_PRICE_PER_SQFT: u32 = 100_000;

const STANDARD_AREA_PRICES: [(&str, u32); 14] = [
    ("75201", 310),
    ("75204", 295),
    ("75205", 420),
    ("75206", 280),
    ("75214", 265),
    ("75219", 300),
    ("75225", 385),
    ("76102", 240),
    ("76107", 225),
    ("78701", 455),
    ("78704", 410),
    ("77002", 260),
    ("77006", 290),
    ("77019", 335),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLookup {
    Area(Decimal),
    RegionalDefault(Decimal),
}

impl PriceLookup {
    pub fn price_per_sqft(self) -> Decimal {
        match self {
            PriceLookup::Area(price) | PriceLookup::RegionalDefault(price) => price,
        }
    }

    pub fn area_data_found(self) -> bool {
        matches!(self, PriceLookup::Area(_))
    }
}

/// Per-postal-area price-per-square-foot table.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPricingTable {
    prices: BTreeMap<String, Decimal>,
    regional_default: Decimal,
}

impl Default for AreaPricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl AreaPricingTable {
    pub fn standard() -> Self {
        let prices = STANDARD_AREA_PRICES
            .iter()
            .map(|(code, price)| (code.to_string(), Decimal::from(*price)))
            .collect();

        Self {
            prices,
            regional_default: Decimal::from(REGIONAL_DEFAULT_PRICE_PER_SQFT),
        }
    }

    pub fn lookup(&self, postal_code: &str) -> PriceLookup {
        match self.prices.get(&normalize_postal_code(postal_code)) {
            Some(price) => PriceLookup::Area(*price),
            None => PriceLookup::RegionalDefault(self.regional_default),
        }
    }

    pub fn regional_default(&self) -> Decimal {
        self.regional_default
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Loads `postal_code,price_per_sqft` rows layered over the standard table.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PricingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PricingImportError> {
        let mut table = Self::standard();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut imported = 0usize;
        for row in csv_reader.deserialize::<PricingRow>() {
            let row = row?;
            let postal_code = normalize_postal_code(&row.postal_code);
            let price = row.price_per_sqft.parse::<Decimal>().map_err(|_| {
                PricingImportError::InvalidPrice {
                    postal_code: postal_code.clone(),
                    raw: row.price_per_sqft.clone(),
                }
            })?;

            if price <= Decimal::ZERO {
                return Err(PricingImportError::InvalidPrice {
                    postal_code,
                    raw: row.price_per_sqft,
                });
            }
            if price > Decimal::from(MAX_PRICE_PER_SQFT) {
                return Err(PricingImportError::PriceAboveCeiling {
                    postal_code,
                    raw: row.price_per_sqft,
                });
            }

            table.prices.insert(postal_code, price);
            imported += 1;
        }

        if imported == 0 {
            return Err(PricingImportError::Empty);
        }

        Ok(table)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PricingImportError {
    #[error("failed to read pricing table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pricing CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("price per sqft for {postal_code} must be a positive number (received '{raw}')")]
    InvalidPrice { postal_code: String, raw: String },
    #[error("price per sqft for {postal_code} exceeds the $100,000 ceiling (received '{raw}')")]
    PriceAboveCeiling { postal_code: String, raw: String },
    #[error("pricing table contained no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct PricingRow {
    postal_code: String,
    price_per_sqft: String,
}

/// Trims, upper-cases, and drops a ZIP+4 suffix.
pub(crate) fn normalize_postal_code(raw: &str) -> String {
    let trimmed = raw.trim().to_ascii_uppercase();
    match trimmed.split_once('-') {
        Some((zip, plus_four))
            if zip.len() == 5
                && zip.chars().all(|c| c.is_ascii_digit())
                && plus_four.chars().all(|c| c.is_ascii_digit()) =>
        {
            zip.to_string()
        }
        _ => trimmed,
    }
}
