use core::hash::Hash;
use core::hash::Hasher;
use core::hint::black_box;

use backshift_hash::HashTable;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use siphasher::sip::SipHasher;

fn hash_key(key: u64) -> u64 {
    let mut hasher = SipHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

const SIZES: &[usize] = &[1 << 12, 1 << 15, 1 << 18];

fn shuffled_keys(count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut keys: Vec<u64> = (0..count as u64).collect();
    keys.shuffle(&mut rng);
    keys
}

fn filled_table(keys: &[u64]) -> HashTable<(u64, u64)> {
    let mut table = HashTable::with_capacity(keys.len());
    for &key in keys {
        table
            .entry(hash_key(key), |&(k, _)| k == key)
            .or_insert((key, key.wrapping_mul(3)));
    }
    table
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in SIZES {
        let keys = shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("table/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut table = HashTable::with_capacity(0);
                    for key in keys {
                        table
                            .entry(hash_key(key), |&(k, _): &(u64, u64)| k == key)
                            .or_insert((key, key));
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = std::collections::HashMap::new();
                    for key in keys {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = hashbrown::HashMap::new();
                    for key in keys {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for &size in SIZES {
        let keys = shuffled_keys(size);
        let table = filled_table(&keys);
        let std_map: std::collections::HashMap<u64, u64> =
            keys.iter().map(|&k| (k, k.wrapping_mul(3))).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("table_hit/{size}"), |b| {
            b.iter(|| {
                for &key in &keys {
                    black_box(table.find(hash_key(key), |&(k, _)| k == key));
                }
            })
        });

        group.bench_function(format!("table_miss/{size}"), |b| {
            b.iter(|| {
                for &key in &keys {
                    let missing = key + size as u64;
                    black_box(table.find(hash_key(missing), |&(k, _)| k == missing));
                }
            })
        });

        group.bench_function(format!("std_hit/{size}"), |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(std_map.get(key));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for &size in SIZES {
        let keys = shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("table/{size}"), |b| {
            b.iter_batched(
                || filled_table(&keys),
                |mut table| {
                    for &key in &keys {
                        black_box(table.remove(hash_key(key), |&(k, _)| k == key));
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || -> std::collections::HashMap<u64, u64> {
                    keys.iter().map(|&k| (k, k)).collect()
                },
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    for &size in SIZES {
        let keys = shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        // Alternating remove/insert at steady load, the pattern where
        // tombstone-based tables degrade.
        group.bench_function(format!("table/{size}"), |b| {
            b.iter_batched(
                || filled_table(&keys),
                |mut table| {
                    for &key in &keys {
                        table.remove(hash_key(key), |&(k, _)| k == key);
                        let replacement = key + size as u64;
                        table
                            .entry(hash_key(replacement), |&(k, _)| k == replacement)
                            .or_insert((replacement, replacement));
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_remove, bench_churn);
criterion_main!(benches);
