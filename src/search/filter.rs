//! Structured filter criteria and the conjunctive matcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::{Condition, FuelType, Listing, ListingStatus, Transmission};

/// Structured filter criteria for the advanced filter operation.
///
/// Every field is optional; an absent field imposes no constraint and
/// populated fields combine conjunctively (logical AND). Set-valued fields
/// match on exact membership, range fields use inclusive bounds.
///
/// Range bounds are not cross-validated: a criteria with `price_min >
/// price_max` is accepted and simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmissions: Option<Vec<Transmission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuels: Option<Vec<FuelType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_max: Option<u32>,
    /// Listing must carry every requested tag (AND semantics, not any-of).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<ListingStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_before: Option<DateTime<Utc>>,
    /// Minimum seller rating, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Membership check shared by the set-valued fields. An empty set behaves
/// like an absent field, matching the lenient source semantics.
fn in_set<T: PartialEq>(set: Option<&Vec<T>>, value: &T) -> bool {
    match set {
        Some(values) if !values.is_empty() => values.contains(value),
        _ => true,
    }
}

impl FilterCriteria {
    /// True when zero fields are populated. The advanced filter operation
    /// rejects empty criteria as invalid input.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Decides whether `listing` satisfies every populated criterion.
    ///
    /// Pure function: the status/active gate is a request-level concern
    /// applied by the engine, not here.
    pub fn matches(&self, listing: &Listing) -> bool {
        if !in_set(self.categories.as_ref(), &listing.category) {
            return false;
        }
        if self.price_min.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| listing.price > max) {
            return false;
        }
        if self.year_min.is_some_and(|min| listing.year < min) {
            return false;
        }
        if self.year_max.is_some_and(|max| listing.year > max) {
            return false;
        }
        if !in_set(self.brands.as_ref(), &listing.brand) {
            return false;
        }
        if !in_set(self.models.as_ref(), &listing.model) {
            return false;
        }
        if !in_set(self.transmissions.as_ref(), &listing.transmission) {
            return false;
        }
        if !in_set(self.fuels.as_ref(), &listing.fuel) {
            return false;
        }
        if !in_set(self.colors.as_ref(), &listing.color) {
            return false;
        }
        if !in_set(self.conditions.as_ref(), &listing.condition) {
            return false;
        }
        if !in_set(self.locations.as_ref(), &listing.location) {
            return false;
        }
        if self.mileage_max.is_some_and(|max| listing.mileage > max) {
            return false;
        }
        if !in_set(self.statuses.as_ref(), &listing.status) {
            return false;
        }
        if self
            .posted_after
            .is_some_and(|after| listing.posted_at < after)
        {
            return false;
        }
        if self
            .posted_before
            .is_some_and(|before| listing.posted_at > before)
        {
            return false;
        }
        if self
            .min_rating
            .is_some_and(|min| listing.seller.rating < min)
        {
            return false;
        }
        if self
            .verified
            .is_some_and(|wanted| listing.seller.verified != wanted)
        {
            return false;
        }
        if let Some(features) = &self.features {
            let has_all = features.iter().all(|tag| listing.features.contains(tag));
            if !has_all {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use chrono::TimeZone;
    use rstest::rstest;

    use crate::listing::Seller;

    fn avanza() -> Listing {
        Listing {
            id: "lst_001".into(),
            brand: "Toyota".into(),
            model: "Avanza".into(),
            year: 2022,
            price: 220_000_000,
            mileage: 15_000,
            transmission: Transmission::Manual,
            fuel: FuelType::Gasoline,
            color: "White".into(),
            condition: Condition::Used,
            location: "Jakarta".into(),
            description: "Great condition, full service record".into(),
            category: "MPV".into(),
            status: ListingStatus::Active,
            posted_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            seller: Seller {
                id: "seller_001".into(),
                name: "Ahmad Dealer".into(),
                rating: 4.8,
                verified: true,
            },
            photos: vec![],
            features: vec!["AC".into(), "Power Steering".into(), "Central Lock".into()],
            views: 150,
            favorites: 12,
        }
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        check!(criteria.is_empty());
        check!(criteria.matches(&avanza()));
    }

    #[test]
    fn populated_criteria_is_not_empty() {
        let criteria = FilterCriteria {
            price_min: Some(1),
            ..FilterCriteria::default()
        };
        check!(!criteria.is_empty());
    }

    #[rstest]
    #[case(Some(200_000_000), None, true)]
    #[case(Some(300_000_000), None, false)]
    #[case(None, Some(220_000_000), true)] // inclusive upper bound
    #[case(None, Some(219_999_999), false)]
    #[case(Some(220_000_000), Some(220_000_000), true)] // inclusive both ends
    fn price_range_bounds_are_inclusive(
        #[case] min: Option<i64>,
        #[case] max: Option<i64>,
        #[case] expected: bool,
    ) {
        let criteria = FilterCriteria {
            price_min: min,
            price_max: max,
            ..FilterCriteria::default()
        };
        check!(criteria.matches(&avanza()) == expected);
    }

    #[test]
    fn inverted_range_silently_matches_nothing() {
        let criteria = FilterCriteria {
            price_min: Some(500_000_000),
            price_max: Some(100_000_000),
            ..FilterCriteria::default()
        };
        check!(!criteria.matches(&avanza()));
    }

    #[test]
    fn conjunction_requires_every_populated_field() {
        let both_ok = FilterCriteria {
            brands: Some(vec!["Toyota".into()]),
            year_min: Some(2020),
            ..FilterCriteria::default()
        };
        check!(both_ok.matches(&avanza()));

        // Same criteria with one failing dimension must reject the listing
        // even though the other still passes.
        let one_fails = FilterCriteria {
            brands: Some(vec!["Toyota".into()]),
            year_min: Some(2023),
            ..FilterCriteria::default()
        };
        check!(!one_fails.matches(&avanza()));

        let other_fails = FilterCriteria {
            brands: Some(vec!["Honda".into()]),
            year_min: Some(2020),
            ..FilterCriteria::default()
        };
        check!(!other_fails.matches(&avanza()));
    }

    #[test]
    fn feature_tags_use_and_semantics() {
        let all_present = FilterCriteria {
            features: Some(vec!["AC".into(), "Central Lock".into()]),
            ..FilterCriteria::default()
        };
        check!(all_present.matches(&avanza()));

        let one_missing = FilterCriteria {
            features: Some(vec!["AC".into(), "Sunroof".into()]),
            ..FilterCriteria::default()
        };
        check!(!one_missing.matches(&avanza()));
    }

    #[test]
    fn seller_constraints_apply_to_sub_record() {
        let rating_ok = FilterCriteria {
            min_rating: Some(4.5),
            verified: Some(true),
            ..FilterCriteria::default()
        };
        check!(rating_ok.matches(&avanza()));

        let rating_too_high = FilterCriteria {
            min_rating: Some(4.9),
            ..FilterCriteria::default()
        };
        check!(!rating_too_high.matches(&avanza()));

        let wants_unverified = FilterCriteria {
            verified: Some(false),
            ..FilterCriteria::default()
        };
        check!(!wants_unverified.matches(&avanza()));
    }

    #[test]
    fn date_range_is_inclusive_of_boundaries() {
        let posted = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let exact = FilterCriteria {
            posted_after: Some(posted),
            posted_before: Some(posted),
            ..FilterCriteria::default()
        };
        check!(exact.matches(&avanza()));
    }

    #[test]
    fn empty_set_field_imposes_no_constraint() {
        let criteria = FilterCriteria {
            brands: Some(vec![]),
            ..FilterCriteria::default()
        };
        check!(criteria.matches(&avanza()));
    }

    #[test]
    fn serializes_only_populated_fields() {
        let criteria = FilterCriteria {
            mileage_max: Some(20_000),
            ..FilterCriteria::default()
        };
        let json = serde_json::to_string(&criteria).unwrap();
        check!(json == "{\"mileage_max\":20000}");
    }
}
