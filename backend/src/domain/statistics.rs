//! Aggregate statistics over the whole property collection.

use std::collections::BTreeMap;

use super::{Property, PropertyStatus};

/// Count of properties per status. Missing statuses count zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCount {
    /// Properties still on the market.
    pub available: u64,
    /// Properties sold.
    pub sold: u64,
}

impl StatusCount {
    fn record(&mut self, status: PropertyStatus) {
        match status {
            PropertyStatus::Available => self.available += 1,
            PropertyStatus::Sold => self.sold += 1,
        }
    }
}

/// Average room counts for one literal location string.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationStats {
    /// Location as stored.
    pub location: String,
    /// Mean bedrooms, rounded to two decimals.
    pub average_bedrooms: f64,
    /// Mean bathrooms, rounded to two decimals.
    pub average_bathrooms: f64,
}

/// Collection-wide aggregates.
///
/// `average_price` is keyed by currency code and holds the mean price in minor
/// units, rounded to two decimals. Currencies are never mixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStatistics {
    /// Number of stored properties.
    pub total_properties: u64,
    /// Mean price per currency, in minor units.
    pub average_price: BTreeMap<String, f64>,
    /// Properties per status.
    pub status_count: StatusCount,
    /// Room averages per location, sorted by location.
    pub location_stats: Vec<LocationStats>,
}

impl PropertyStatistics {
    /// Fold a set of properties into statistics.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PropertyStatistics;
    ///
    /// let stats = PropertyStatistics::from_properties(std::iter::empty());
    /// assert_eq!(stats.total_properties, 0);
    /// assert!(stats.average_price.is_empty());
    /// assert!(stats.location_stats.is_empty());
    /// ```
    pub fn from_properties<'a, I>(properties: I) -> Self
    where
        I: IntoIterator<Item = &'a Property>,
    {
        let mut total = 0_u64;
        let mut status_count = StatusCount::default();
        let mut prices: BTreeMap<String, Mean> = BTreeMap::new();
        let mut rooms: BTreeMap<String, (Mean, Mean)> = BTreeMap::new();

        for property in properties {
            total += 1;
            status_count.record(property.status);
            prices
                .entry(property.amount.currency.as_str().to_owned())
                .or_default()
                .push(property.amount.price);
            let (bedrooms, bathrooms) = rooms.entry(property.location.clone()).or_default();
            bedrooms.push(u64::from(property.bedrooms));
            bathrooms.push(u64::from(property.bathrooms));
        }

        Self {
            total_properties: total,
            average_price: prices
                .into_iter()
                .map(|(currency, mean)| (currency, round2(mean.value())))
                .collect(),
            status_count,
            location_stats: rooms
                .into_iter()
                .map(|(location, (bedrooms, bathrooms))| LocationStats {
                    location,
                    average_bedrooms: round2(bedrooms.value()),
                    average_bathrooms: round2(bathrooms.value()),
                })
                .collect(),
        }
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: u128,
    count: u64,
}

impl Mean {
    fn push(&mut self, value: u64) {
        self.sum += u128::from(value);
        self.count += 1;
    }

    fn value(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }
}
