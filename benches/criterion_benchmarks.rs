use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use runedata::buffer::ByteCursor;
use runedata::config::{ConfigKind, Definition, ItemDefinition, NpcDefinition};
use runedata::region::{LAYERS, REGION_SIZE, RegionDefinition, load_regions};
use runedata::store::{IndexType, MemoryStore};
use std::collections::BTreeMap;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) as u8
    }
}

fn item_record(id: u32) -> Vec<u8> {
    let mut out = vec![1, (id >> 8) as u8, id as u8, 2];
    out.extend_from_slice(format!("Item {id}").as_bytes());
    out.push(0);
    out.extend_from_slice(&[12, 0, 0, (id >> 8) as u8, id as u8]);
    out.extend_from_slice(&[16, 65, 35]);
    out.extend_from_slice(b"Wield\0");
    out.extend_from_slice(&[40, 2, 0, 1, 0, 2, 0, 3, 0, 4]);
    out.extend_from_slice(&[249, 2, 0, 0, 0, 1, 0, 0, 0, 9, 1, 0, 0, 2]);
    out.extend_from_slice(b"param\0");
    out.push(0);
    out
}

fn npc_record(id: u32) -> Vec<u8> {
    let mut out = vec![1, 3, 0, 1, 0, 2, 0, 3, 2];
    out.extend_from_slice(format!("Npc {id}").as_bytes());
    out.push(0);
    out.extend_from_slice(&[30]);
    out.extend_from_slice(b"Talk-to\0");
    out.extend_from_slice(&[95, 0, (id % 126) as u8, 0]);
    out
}

/// Landscape where every tile carries a random mix of attributes.
fn landscape(seed: u64) -> Vec<u8> {
    let mut rng = Lcg(seed);
    let mut out = Vec::with_capacity(LAYERS * REGION_SIZE * REGION_SIZE * 3);
    for _ in 0..LAYERS * REGION_SIZE * REGION_SIZE {
        match rng.next() % 4 {
            0 => out.push(0),
            1 => out.extend_from_slice(&[1, rng.next() % 32]),
            2 => out.extend_from_slice(&[2 + rng.next() % 48, rng.next(), 0]),
            _ => out.extend_from_slice(&[82 + rng.next() % 100, 50 + rng.next() % 8, 0]),
        }
    }
    out
}

/// `groups` object ids, each placed on a handful of tiles.
fn objects(groups: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..groups {
        out.push(7);
        for _ in 0..5 {
            out.extend_from_slice(&[0x81, 0x01, 0b1010]);
        }
        out.push(0);
    }
    out.push(0);
    out
}

fn config_store(count: u32) -> MemoryStore {
    let mut store = MemoryStore::new();
    let items: BTreeMap<u32, Vec<u8>> = (0..count).map(|id| (id, item_record(id))).collect();
    let npcs: BTreeMap<u32, Vec<u8>> = (0..count).map(|id| (id, npc_record(id))).collect();
    let table = IndexType::Configs.id();
    store
        .insert_archive(table, ConfigKind::Item.archive(), &items)
        .unwrap();
    store
        .insert_archive(table, ConfigKind::Npc.archive(), &npcs)
        .unwrap();
    store
}

fn bench_record_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("record_decode");
    let item = item_record(4151);
    let npc = npc_record(1);
    g.bench_function("item", |b| {
        b.iter(|| ConfigKind::Item.decode_any(4151, black_box(&item)).unwrap());
    });
    g.bench_function("npc", |b| {
        b.iter(|| ConfigKind::Npc.decode_any(1, black_box(&npc)).unwrap());
    });
    g.finish();
}

fn bench_table_load(c: &mut Criterion) {
    let mut g = c.benchmark_group("table_load");
    for count in [1_000u32, 10_000] {
        let store = config_store(count);
        g.throughput(Throughput::Elements(u64::from(count)));
        g.bench_with_input(BenchmarkId::new("item", count), &store, |b, store| {
            b.iter(|| black_box(ItemDefinition::load(store).unwrap()));
        });
        g.bench_with_input(BenchmarkId::new("npc", count), &store, |b, store| {
            b.iter(|| black_box(NpcDefinition::load(store).unwrap()));
        });
    }
    g.finish();
}

fn bench_region_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("region_decode");
    let land = landscape(42);
    g.throughput(Throughput::Bytes(land.len() as u64));
    g.bench_function("landscape", |b| {
        b.iter(|| {
            let mut region = RegionDefinition::new(50, 50);
            region
                .decode_landscape(&mut ByteCursor::new(black_box(&land)))
                .unwrap();
            region
        });
    });

    let mut region = RegionDefinition::new(50, 50);
    region.decode_landscape(&mut ByteCursor::new(&land)).unwrap();
    for groups in [100usize, 1_000] {
        let data = objects(groups);
        g.bench_with_input(BenchmarkId::new("objects", groups), &data, |b, data| {
            b.iter(|| {
                let mut r = region.clone();
                r.decode_objects(&mut ByteCursor::new(black_box(data))).unwrap();
                r
            });
        });
    }
    g.finish();
}

fn bench_region_load(c: &mut Criterion) {
    let mut store = MemoryStore::new();
    for x in 40..48u8 {
        for y in 50..54u8 {
            let seed = (u64::from(x) << 8) | u64::from(y);
            store
                .insert_region(x, y, &landscape(seed), &objects(200), [1, 2, 3, 4])
                .unwrap();
        }
    }
    c.bench_function("region_load_32", |b| {
        b.iter(|| black_box(load_regions(&store).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_record_decode,
    bench_table_load,
    bench_region_decode,
    bench_region_load
);
criterion_main!(benches);
