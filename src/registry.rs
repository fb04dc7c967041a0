//! Commodity configuration lookup table.
//!
//! Maps a commodity name to its data source and SARIMA hyperparameters.
//! Commodities listed in the catalogue but missing a configuration are
//! reported as not yet supported by the predictor.

use crate::error::{Error, Result};
use crate::models::{HyperparameterSet, Order, SeasonalOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Every commodity the application knows about, supported or not.
pub const CATALOGUE: [&str; 22] = [
    "Gram Dal",
    "Sugar",
    "Gur",
    "Wheat",
    "Tea",
    "Milk",
    "Salt",
    "Atta",
    "Tur/Arhar Dal",
    "Urad Dal",
    "Moong Dal",
    "Masoor Dal",
    "Groundnut Oil",
    "Mustard Oil",
    "Vanaspati",
    "Sunflower Oil",
    "Soya Oil",
    "Palm Oil",
    "Rice",
    "Potato",
    "Onion",
    "Tomato",
];

/// Configuration record for one commodity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityConfig {
    /// Display name, matched case-insensitively.
    pub name: String,
    /// Data source identifier handed to the series source.
    pub source: String,
    pub order: Order,
    pub seasonal_order: SeasonalOrder,
}

impl CommodityConfig {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        order: Order,
        seasonal_order: SeasonalOrder,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            order,
            seasonal_order,
        }
    }

    pub fn hyperparameters(&self) -> HyperparameterSet {
        HyperparameterSet {
            order: self.order,
            seasonal_order: self.seasonal_order,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    catalogue: Vec<String>,
    #[serde(default, rename = "commodity")]
    commodities: Vec<CommodityConfig>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lookup table from commodity name to configuration.
#[derive(Debug, Clone, Default)]
pub struct CommodityRegistry {
    entries: HashMap<String, CommodityConfig>,
    catalogue: Vec<String>,
}

impl CommodityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of supported commodities.
    pub fn builtin() -> Self {
        // Every built-in model mirrors its non-seasonal order in the yearly cycle.
        let table = [
            ("Gram Dal", "Dal_Price.csv", (0, 1, 2)),
            ("Sugar", "Chini.csv", (0, 1, 1)),
            ("Wheat", "Wheat - Sheet1.csv", (1, 1, 0)),
            ("Gur", "Gur.csv", (2, 1, 1)),
            ("Milk", "Milk - Sheet1.csv", (2, 2, 2)),
            ("Tea", "Tea - Sheet1.csv", (1, 1, 1)),
            ("Salt", "Salt - Sheet1.csv", (0, 1, 1)),
        ];

        let mut registry = Self {
            entries: HashMap::new(),
            catalogue: CATALOGUE.iter().map(|s| s.to_string()).collect(),
        };
        for (name, source, (p, d, q)) in table {
            registry.entries.insert(
                normalize(name),
                CommodityConfig::new(
                    name,
                    source,
                    Order::new(p, d, q),
                    SeasonalOrder::monthly(p, d, q),
                ),
            );
        }
        registry
    }

    /// Parse a registry from TOML.
    ///
    /// ```toml
    /// catalogue = ["Sugar", "Rice"]
    ///
    /// [[commodity]]
    /// name = "Sugar"
    /// source = "Chini.csv"
    /// order = [0, 1, 1]
    /// seasonal_order = [0, 1, 1, 12]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(content)?;
        let mut registry = Self {
            entries: HashMap::new(),
            catalogue: file.catalogue,
        };
        for config in file.commodities {
            registry.insert(config)?;
        }
        Ok(registry)
    }

    /// Read and parse a TOML registry file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Register a commodity; duplicate names and invalid orders are rejected.
    pub fn insert(&mut self, config: CommodityConfig) -> Result<()> {
        config.hyperparameters().validate()?;
        let key = normalize(&config.name);
        if key.is_empty() {
            return Err(Error::Configuration("commodity name is empty".to_string()));
        }
        if self.entries.contains_key(&key) {
            return Err(Error::Configuration(format!(
                "duplicate commodity: {}",
                config.name
            )));
        }
        if !self.catalogue.iter().any(|c| normalize(c) == key) {
            self.catalogue.push(config.name.clone());
        }
        self.entries.insert(key, config);
        Ok(())
    }

    /// Configuration for `name`, if the commodity is supported.
    pub fn get(&self, name: &str) -> Option<&CommodityConfig> {
        self.entries.get(&normalize(name))
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether the commodity appears in the catalogue.
    pub fn is_known(&self, name: &str) -> bool {
        let key = normalize(name);
        self.catalogue.iter().any(|c| normalize(c) == key)
    }

    /// All known commodity names in catalogue order.
    pub fn catalogue(&self) -> &[String] {
        &self.catalogue
    }

    /// Supported commodities in catalogue order.
    pub fn supported(&self) -> Vec<&CommodityConfig> {
        self.catalogue.iter().filter_map(|c| self.get(c)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
