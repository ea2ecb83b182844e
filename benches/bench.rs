use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tagmatch::Router;

const CONFIG: &str = "\
servers.localhost .host.measurement*
servers.*.cpu .host.measurement.core
servers.* .host.measurement*
prod.*.mem .host.measurement*
influxd.*.queries measurement.tool.measurement*
*.localhost .host.measurement*
stats.counters.*.rate ..service.measurement*
a.b.c measurement*";

static NAMES: &[&str] = &[
    "servers.localhost.cpu.load",
    "servers.web01.cpu.user",
    "servers.web02.mem.used",
    "prod.db01.mem.free",
    "influxd.v2.queries.executed",
    "stats.counters.api.rate.5xx",
    "completely.unrelated.name",
    "uptime",
];

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| black_box(Router::new(black_box(CONFIG)).unwrap()));
    });
}

fn bench_route(c: &mut Criterion) {
    let router = Router::new(CONFIG).unwrap();

    c.bench_function("route", |b| {
        b.iter(|| {
            for name in black_box(NAMES) {
                black_box(router.route(name));
            }
        });
    });
}

criterion_group!(benches, bench_build, bench_route);
criterion_main!(benches);
