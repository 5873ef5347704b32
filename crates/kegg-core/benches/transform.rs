use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use kegg_core::*;

const POOL: u32 = 2_000;

fn create_tables() -> LookupTables {
    let mut compound = LookupTable::new(IdKind::Compound);
    let mut reaction = LookupTable::new(IdKind::Reaction);
    let mut pathway = LookupTable::new(IdKind::Pathway);
    let mut orthology = LookupTable::new(IdKind::Orthology);
    for n in 0..POOL {
        compound.insert(format!("C{:05}", n), format!("compound {}", n));
        reaction.insert(format!("R{:05}", n), format!("reaction {}", n));
        pathway.insert(format!("map{:05}", n), format!("pathway {}", n));
        orthology.insert(format!("K{:05}", n), format!("orthology {}", n));
    }
    LookupTables::new(compound, reaction, pathway, orthology).unwrap()
}

fn create_link_file(rows: u32) -> String {
    let mut out = String::from("pathwayId\tcpdId\n");
    for i in 0..rows {
        // Repeats every POOL rows so later rows hit the dedup sets.
        out.push_str(&format!("rn{:05}\tC{:05}\n", i % 97, i % POOL));
    }
    out
}

fn bench_process_link_file(c: &mut Criterion) {
    let tables = create_tables();
    let input = create_link_file(20_000);
    let processor = LinkFileProcessor::new(&tables);

    c.bench_function("process 20k-row pathway-compound file", |b| {
        b.iter_batched(
            || (TsvGraphWriter::new(Vec::new(), Vec::new()), DedupState::new()),
            |(mut sink, mut state)| {
                processor
                    .process("bench.tsv", input.as_bytes(), &mut sink, WriteMode::Overwrite, &mut state)
                    .unwrap();
                sink.into_inner().unwrap()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_lookup_resolve(c: &mut Criterion) {
    let tables = create_tables();

    c.bench_function("resolve pathway variant id", |b| {
        b.iter(|| tables.resolve(IdKind::Pathway, "rn00042"));
    });
}

criterion_group!(benches, bench_process_link_file, bench_lookup_resolve);
criterion_main!(benches);
