//! Performance benchmarks for contact search.
//!
//! These benchmarks measure:
//! - Server-side search through the service over an in-memory SQLite store
//! - The blank-query path, which lists every contact
//! - The UI's local fallback filter
//! - Different dataset sizes

use contact_app::domain::{ContactId, EmailAddress, PhoneNumber};
use contact_app::repositories::SqliteContactRepository;
use contact_app::services::{ContactService, ContactServiceImpl};
use contact_app::ui::local_filter;
use contact_app::{Contact, CreateContactRequest};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

const SIZES: [usize; 3] = [100, 1_000, 5_000];

fn request(i: usize) -> CreateContactRequest {
    CreateContactRequest::new(
        format!("Person {} Johnson", i),
        format!("+62 8{:010}", i),
        format!("person{}@example.com", i),
    )
}

/// A service over a store pre-filled with `size` contacts.
fn seeded_service(rt: &Runtime, size: usize) -> ContactServiceImpl {
    rt.block_on(async {
        let repo = SqliteContactRepository::open_in_memory().expect("open store");
        let service = ContactServiceImpl::new(Arc::new(repo));
        for i in 0..size {
            service.create(request(i)).await.expect("seed contact");
        }
        service
    })
}

fn in_memory_contacts(size: usize) -> Vec<Contact> {
    let now = chrono::Utc::now();
    (0..size)
        .map(|i| {
            let req = request(i);
            Contact {
                id: ContactId::generate(),
                name: req.name,
                phone: PhoneNumber::new(req.phone).expect("valid phone"),
                email: EmailAddress::new(req.email).expect("valid email"),
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

/// Benchmark substring search through the service.
fn bench_service_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("service_search");

    for size in SIZES {
        let service = seeded_service(&rt, size);

        group.bench_with_input(BenchmarkId::new("narrow", size), &size, |b, _| {
            b.to_async(&rt)
                .iter(|| async { black_box(service.search("person 42 ").await.unwrap()) });
        });

        group.bench_with_input(BenchmarkId::new("broad", size), &size, |b, _| {
            b.to_async(&rt)
                .iter(|| async { black_box(service.search("JOHNSON").await.unwrap()) });
        });

        group.bench_with_input(BenchmarkId::new("blank", size), &size, |b, _| {
            b.to_async(&rt)
                .iter(|| async { black_box(service.search("").await.unwrap()) });
        });
    }

    group.finish();
}

/// Benchmark the UI's local fallback filter.
fn bench_local_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_filter");

    for size in SIZES {
        let contacts = in_memory_contacts(size);

        group.bench_with_input(BenchmarkId::new("name", size), &contacts, |b, contacts| {
            b.iter(|| black_box(local_filter(contacts, "person 42")));
        });

        group.bench_with_input(BenchmarkId::new("phone", size), &contacts, |b, contacts| {
            b.iter(|| black_box(local_filter(contacts, "0000004")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_service_search, bench_local_filter);
criterion_main!(benches);
