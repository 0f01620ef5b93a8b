use criterion::{Criterion, criterion_group, criterion_main};
use libforgelink::prelude::*;

fn scoring(c: &mut Criterion) {
  let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

  let pool = (0..200u32)
    .map(|index| {
      ManufacturerProfile::builder(&format!("Shop {index}"))
        .processes(&["CNC Machining", "Wire EDM", "Anodizing"])
        .materials(&["6061 aluminum", "stainless 304"])
        .industries(&["aerospace"])
        .certifications(&["ISO 9001"])
        .completed_orders(20 + index)
        .overall_rating(3.5 + (index % 15) as f64 / 10.0)
        .on_time_rate(0.8)
        .lead_time_days(5 + index % 20)
        .country("United States")
        .build()
    })
    .collect::<Vec<_>>();

  let quotes = ProfileQuotes::from_profiles(&pool);
  let engine = Forgelink::new(InMemoryDirectory::with_profiles(pool), quotes);

  let order = Order::builder("CNC Machining").materials(&["6061 aluminum"]).industry("aerospace").budget((1_000.0, 3_000.0)).country("United States").build();

  c.bench_function("rank_manufacturers_200", |b| {
    b.iter(|| runtime.block_on(engine.rank_manufacturers(&order, &MatchParams::default())).unwrap());
  });
}

criterion_group!(benches, scoring);
criterion_main!(benches);
