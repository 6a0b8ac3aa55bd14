use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use realty_listings::inquiries::{InquiryIntake, InquiryRepository, InquirySubmission};
use realty_listings::listings::{CatalogError, PropertyCatalog, PropertyDetails, PropertyId};
use realty_listings::seed::sample_properties;
use realty_listings::storage::{Clock, InMemoryInquiryRepository, InMemoryPropertyRepository};

fn hourly_clock() -> Clock {
    let tick = Arc::new(AtomicI64::new(0));
    let start = Utc
        .with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
        .single()
        .expect("valid start");
    Arc::new(move || start + Duration::hours(tick.fetch_add(1, Ordering::Relaxed)))
}

fn listing(title: &str, sq_ft: f64, price_per_sq_ft: f64) -> PropertyDetails {
    PropertyDetails {
        title: title.to_string(),
        sq_ft,
        price_per_sq_ft,
        owner_name: "Owner".to_string(),
        broker_name: "Broker".to_string(),
        broker_phone: "555-0100".to_string(),
        address: String::new(),
        description: String::new(),
        cover_image_url: String::new(),
    }
}

#[tokio::test]
async fn list_all_returns_newest_first() {
    let repository = Arc::new(InMemoryPropertyRepository::with_clock(hourly_clock()));
    let catalog = PropertyCatalog::new(repository);

    for title in ["t1", "t2", "t3"] {
        catalog
            .publish(listing(title, 1000.0, 4000.0))
            .await
            .expect("publish");
    }

    let listed = catalog.list_all().await.expect("list succeeds");
    let titles: Vec<&str> = listed.iter().map(|p| p.details.title.as_str()).collect();
    assert_eq!(titles, vec!["t3", "t2", "t1"]);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[tokio::test]
async fn stored_listing_reports_derived_total_price() {
    let catalog = PropertyCatalog::new(Arc::new(InMemoryPropertyRepository::default()));
    let stored = catalog
        .publish(sample_properties().remove(0))
        .await
        .expect("publish");

    let fetched = catalog
        .get_by_id(&stored.id.to_string())
        .await
        .expect("property found");
    assert_eq!(fetched.details.sq_ft, 1150.0);
    assert_eq!(fetched.details.price_per_sq_ft, 6200.0);
    assert_eq!(fetched.total_price(), 7_130_000.0);
    assert_eq!(fetched.view().total_price, 7_130_000.0);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let catalog = PropertyCatalog::new(Arc::new(InMemoryPropertyRepository::default()));
    catalog
        .publish(listing("Only listing", 800.0, 3000.0))
        .await
        .expect("publish");

    for raw in [
        PropertyId::generate().to_string(),
        "123".to_string(),
        "../etc/passwd".to_string(),
        String::new(),
    ] {
        let err = catalog.get_by_id(&raw).await.expect_err("no such property");
        assert!(
            matches!(err, CatalogError::NotFound { ref id } if *id == raw),
            "unexpected error for {raw:?}: {err:?}"
        );
    }
}

#[tokio::test]
async fn inquiries_may_reference_missing_properties() {
    let repository = Arc::new(InMemoryInquiryRepository::default());
    let intake = InquiryIntake::new(Arc::clone(&repository));
    let dangling = PropertyId::generate();

    let inquiry = intake
        .create(
            &dangling.to_string(),
            InquirySubmission {
                name: "Riya".to_string(),
                phone: "+91 99887 76655".to_string(),
                email: "User@Example.COM".to_string(),
            },
        )
        .await
        .expect("intake does not enforce references");

    assert_eq!(inquiry.property, dangling);
    assert_eq!(inquiry.email, "user@example.com");
    let listed = repository
        .list_for_property(dangling)
        .await
        .expect("list succeeds");
    assert_eq!(listed, vec![inquiry]);
}
