// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{StoreError, ValidationError};
use crate::persistence::Persistence;
use crate::projection::MAX_FORECAST_MONTHS;

pub const CURRENCY_SYMBOL: &str = "currency_symbol";
pub const FORECAST_MONTHS: &str = "forecast_months";

/// Settings kept in the user's store, with the value used when unset.
pub const KNOWN_SETTINGS: [(&str, &str); 2] = [(CURRENCY_SYMBOL, "₹"), (FORECAST_MONTHS, "3")];

pub fn default_for(key: &str) -> Result<&'static str, ValidationError> {
    KNOWN_SETTINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| ValidationError::UnknownSetting(key.to_string()))
}

pub fn get<P: Persistence>(backend: &P, key: &str) -> Result<String, StoreError> {
    let fallback = default_for(key)?;
    Ok(backend
        .get_setting(key)?
        .unwrap_or_else(|| fallback.to_string()))
}

pub fn set<P: Persistence>(backend: &P, key: &str, value: &str) -> Result<(), StoreError> {
    default_for(key)?;
    let value = value.trim();
    let valid = match key {
        FORECAST_MONTHS => parse_forecast_months(value).is_some(),
        _ => !value.is_empty(),
    };
    if !valid {
        return Err(ValidationError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    backend.set_setting(key, value)
}

pub fn currency_symbol<P: Persistence>(backend: &P) -> Result<String, StoreError> {
    get(backend, CURRENCY_SYMBOL)
}

/// Errors when the stored value is not a month count in range.
pub fn forecast_months<P: Persistence>(backend: &P) -> Result<u32, StoreError> {
    let raw = get(backend, FORECAST_MONTHS)?;
    parse_forecast_months(&raw).ok_or_else(|| {
        ValidationError::InvalidSetting {
            key: FORECAST_MONTHS.to_string(),
            value: raw.clone(),
        }
        .into()
    })
}

fn parse_forecast_months(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_FORECAST_MONTHS).contains(n))
}
