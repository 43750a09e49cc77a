//! Shared test fixtures for integration tests.
//!
//! Each test builds its own [`SearchEngine`] over a small in-memory catalog,
//! so there is no shared cache or history state between tests. The demo
//! catalog mirrors a realistic marketplace slice: three active listings in
//! distinct categories, a second MPV for pagination cases, and one sold
//! listing for status-gate cases.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;

use lotsearch::{
    Condition, FuelType, InMemoryCatalog, Listing, ListingStatus, SearchEngine, Seller,
    Transmission,
};

fn posted(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

#[allow(dead_code)] // Builders used across different integration test crates
pub fn avanza() -> Listing {
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
        description: "Toyota Avanza 2022 in great shape, complete service records".into(),
        category: "MPV".into(),
        status: ListingStatus::Active,
        posted_at: posted(2024, 1, 15),
        seller: Seller {
            id: "seller_001".into(),
            name: "Ahmad Dealer".into(),
            rating: 4.8,
            verified: true,
        },
        photos: vec!["avanza1.jpg".into(), "avanza2.jpg".into()],
        features: vec!["AC".into(), "Power Steering".into(), "Central Lock".into()],
        views: 150,
        favorites: 12,
    }
}

#[allow(dead_code)]
pub fn civic() -> Listing {
    Listing {
        id: "lst_002".into(),
        brand: "Honda".into(),
        model: "Civic".into(),
        year: 2021,
        price: 450_000_000,
        mileage: 25_000,
        transmission: Transmission::Automatic,
        fuel: FuelType::Gasoline,
        color: "Black".into(),
        condition: Condition::Used,
        location: "Surabaya".into(),
        description: "Honda Civic Turbo 2021, pristine and fully original".into(),
        category: "Sedan".into(),
        status: ListingStatus::Active,
        posted_at: posted(2024, 1, 20),
        seller: Seller {
            id: "seller_002".into(),
            name: "Budi Motors".into(),
            rating: 4.5,
            verified: true,
        },
        photos: vec!["civic1.jpg".into()],
        features: vec!["Sunroof".into(), "Leather Seat".into(), "Turbo Engine".into()],
        views: 89,
        favorites: 8,
    }
}

#[allow(dead_code)]
pub fn pajero() -> Listing {
    Listing {
        id: "lst_003".into(),
        brand: "Mitsubishi".into(),
        model: "Pajero Sport".into(),
        year: 2023,
        price: 580_000_000,
        mileage: 5_000,
        transmission: Transmission::Automatic,
        fuel: FuelType::Diesel,
        color: "Silver".into(),
        condition: Condition::New,
        location: "Bandung".into(),
        description: "Brand new Pajero Sport with official warranty".into(),
        category: "SUV".into(),
        status: ListingStatus::Active,
        posted_at: posted(2024, 1, 25),
        seller: Seller {
            id: "seller_003".into(),
            name: "Cahaya Motor".into(),
            rating: 4.9,
            verified: true,
        },
        photos: vec!["pajero1.jpg".into()],
        features: vec!["4WD".into(), "Cruise Control".into(), "Parking Sensor".into()],
        views: 234,
        favorites: 25,
    }
}

#[allow(dead_code)]
pub fn ertiga() -> Listing {
    Listing {
        id: "lst_004".into(),
        brand: "Suzuki".into(),
        model: "Ertiga".into(),
        year: 2020,
        price: 180_000_000,
        mileage: 40_000,
        transmission: Transmission::Manual,
        fuel: FuelType::Gasoline,
        color: "Gray".into(),
        condition: Condition::Used,
        location: "Jakarta".into(),
        description: "Reliable family workhorse, tidy interior".into(),
        category: "MPV".into(),
        status: ListingStatus::Active,
        posted_at: posted(2024, 1, 10),
        seller: Seller {
            id: "seller_004".into(),
            name: "Dian Mobil".into(),
            rating: 4.2,
            verified: false,
        },
        photos: vec![],
        features: vec!["AC".into(), "Power Steering".into()],
        views: 60,
        favorites: 3,
    }
}

/// A sold listing; invisible to requests unless they opt into inactive
/// records.
#[allow(dead_code)]
pub fn sold_veloz() -> Listing {
    Listing {
        id: "lst_005".into(),
        brand: "Toyota".into(),
        model: "Avanza Veloz".into(),
        year: 2023,
        price: 260_000_000,
        mileage: 8_000,
        transmission: Transmission::Automatic,
        fuel: FuelType::Gasoline,
        color: "Red".into(),
        condition: Condition::Used,
        location: "Jakarta".into(),
        description: "Top trim, sold last week".into(),
        category: "MPV".into(),
        status: ListingStatus::Sold,
        posted_at: posted(2024, 1, 5),
        seller: Seller {
            id: "seller_001".into(),
            name: "Ahmad Dealer".into(),
            rating: 4.8,
            verified: true,
        },
        photos: vec![],
        features: vec!["AC".into()],
        views: 301,
        favorites: 40,
    }
}

#[allow(dead_code)]
pub fn demo_listings() -> Vec<Listing> {
    vec![avanza(), civic(), pajero(), ertiga(), sold_veloz()]
}

/// Engine over the full demo catalog with default collaborators.
#[fixture]
#[allow(dead_code)]
pub fn demo_engine() -> SearchEngine {
    SearchEngine::new(Arc::new(InMemoryCatalog::new(demo_listings())))
}

/// Engine over an arbitrary listing set.
#[allow(dead_code)]
pub fn engine_over(listings: Vec<Listing>) -> SearchEngine {
    SearchEngine::new(Arc::new(InMemoryCatalog::new(listings)))
}
