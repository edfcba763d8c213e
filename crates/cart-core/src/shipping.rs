//! # Shipping Details
//!
//! Address and contact fields collected at checkout, plus the field rules
//! the request binder applies before the checkout flow runs.

use crate::validation::ModelState;
use serde::{Deserialize, Serialize};

/// Where and how to ship an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingDetails {
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub gift_wrap: bool,
}

impl ShippingDetails {
    /// Builder: set recipient name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: set the mandatory address parts
    pub fn with_address(
        mut self,
        line1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.line1 = line1.into();
        self.city = city.into();
        self.state = state.into();
        self.country = country.into();
        self
    }

    /// Builder: request gift wrapping
    pub fn with_gift_wrap(mut self, gift_wrap: bool) -> Self {
        self.gift_wrap = gift_wrap;
        self
    }

    /// Check required fields, recording one error per blank field
    pub fn validate(&self, state: &mut ModelState) {
        let required = [
            ("name", &self.name, "Please enter a name"),
            ("line1", &self.line1, "Please enter the first address line"),
            ("city", &self.city, "Please enter a city name"),
            ("state", &self.state, "Please enter a state name"),
            ("country", &self.country, "Please enter a country name"),
        ];

        for (key, value, message) in required {
            if value.trim().is_empty() {
                state.add_error(key, message);
            }
        }
    }

    /// Address lines that are not blank, in order
    pub fn address_lines(&self) -> impl Iterator<Item = &str> {
        [&self.line1, &self.line2, &self.line3]
            .into_iter()
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
    }
}
