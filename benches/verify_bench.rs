use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gaioracle::dns::{AddrInfoList, ResolutionRecord};
use gaioracle::oracle::{ipv6_literal, OracleConfig, Verifier};
use std::net::{Ipv4Addr, Ipv6Addr};

fn loopback_records(count: usize) -> Vec<ResolutionRecord<'static>> {
    (0..count)
        .map(|i| match i % 3 {
            0 => ResolutionRecord::ipv4(Ipv4Addr::LOCALHOST).with_canonical_name("localhost"),
            1 => ResolutionRecord::ipv6(Ipv6Addr::LOCALHOST),
            _ => ResolutionRecord::other(libc::AF_UNIX),
        })
        .collect()
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    let verifier = Verifier::new(&OracleConfig::default());

    let list = AddrInfoList::from_records(loopback_records(1000));
    group.bench_function("verify_1000_mixed_records_no_hints", |b| {
        b.iter(|| black_box(verifier.verify(&list, false)));
    });
    group.bench_function("verify_1000_mixed_records_hints", |b| {
        b.iter(|| black_box(verifier.verify(&list, true)));
    });

    group.finish();
}

fn bench_literal(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal");
    let addrs: Vec<[u8; 16]> = vec![
        Ipv6Addr::LOCALHOST.octets(),
        "2001:db8::1".parse::<Ipv6Addr>().unwrap().octets(),
        Ipv4Addr::LOCALHOST.to_ipv6_mapped().octets(),
    ];

    group.bench_function("ipv6_literal_mixed", |b| {
        b.iter(|| {
            for addr in &addrs {
                black_box(ipv6_literal(*addr));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_verify, bench_literal);
criterion_main!(benches);
