use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hotel_intake::{
    domain::{FormPatch, FormRecord, KeywordChips, Ota},
    wizard::{validate_step, AcceptingSubmitter, SubmissionCollaborator, WizardStep},
};

fn build_complete_record(keyword_count: usize) -> FormRecord {
    let keywords: KeywordChips = (0..keyword_count).map(|idx| format!("Keyword {idx}")).collect();
    let mut record = FormRecord::new();
    record.apply(
        FormPatch::new()
            .hotel_name("Grand Resort")
            .brand("Independent")
            .country("Thailand")
            .city("Phuket")
            .keywords(keywords)
            .start_date("2025-01-01")
            .end_date("2025-06-01")
            .google_maps_url("https://www.google.com/maps/place/grand")
            .trip_advisor_url("https://www.tripadvisor.com/Hotel_Review-grand")
            .selected_otas(vec![Ota::BookingCom, Ota::Agoda, Ota::Expedia])
            .ota_url(Ota::BookingCom, "https://www.booking.com/hotel/grand")
            .ota_url(Ota::Agoda, "https://www.agoda.com/grand")
            .ota_url(Ota::Expedia, "https://www.expedia.com/grand"),
    );
    record
}

fn bench_step_validation(c: &mut Criterion) {
    let record = build_complete_record(black_box(50));

    c.bench_function("validate_all_steps", |b| {
        b.iter(|| {
            for step in WizardStep::ALL {
                black_box(validate_step(step, &record));
            }
        })
    });

    c.bench_function("validate_reviews_step", |b| {
        b.iter(|| black_box(validate_step(WizardStep::Reviews, &record)))
    });
}

fn bench_submission(c: &mut Criterion) {
    let record = build_complete_record(black_box(50));

    c.bench_function("accepting_submit", |b| {
        b.iter_batched(
            AcceptingSubmitter::new,
            |mut submitter| {
                let receipt = submitter.submit(&record).expect("submit");
                black_box(receipt);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_step_validation, bench_submission);
criterion_main!(benches);
