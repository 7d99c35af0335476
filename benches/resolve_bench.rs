use criterion::{black_box, criterion_group, criterion_main, Criterion};

use _rust::crs::create_crs;
use _rust::datum::ShiftOperation;
use _rust::params::ParameterSet;
use _rust::proj::handle::ProjectionHandle;

const DEFINITIONS: &[(&str, &str)] = &[
    ("utm", "+proj=utm +zone=31 +ellps=WGS_1984 +datum=WGS84"),
    ("utm_south", "+proj=utm +zone=33 +south +datum=WGS84"),
    (
        "lcc_2sp",
        "+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +x_0=700000 +y_0=6600000 \
         +ellps=GRS80 +towgs84=0,0,0,0,0,0,0",
    ),
    ("longlat", "+proj=longlat +datum=NTF"),
    (
        "synthesized",
        "+proj=tmerc +lat_0=0 +lon_0=9 +k_0=0.9996 +x_0=500000 +a=6377397.155 \
         +rf=299.1528128 +pm=ferro +towgs84=598.1,73.7,418.2,0.202,0.045,-2.455,6.7",
    ),
];

fn bench_create_crs(c: &mut Criterion) {
    for &(label, definition) in DEFINITIONS {
        let params: ParameterSet = definition.parse().unwrap();
        c.bench_function(&format!("create_crs_{label}"), |b| {
            b.iter(|| black_box(create_crs("bench", black_box(&params)).unwrap()));
        });
    }
}

fn bench_parse_definition(c: &mut Criterion) {
    let (_, definition) = DEFINITIONS[2];
    c.bench_function("parse_definition_lcc", |b| {
        b.iter(|| black_box(black_box(definition).parse::<ParameterSet>().unwrap()));
    });
}

fn bench_classify_towgs84(c: &mut Criterion) {
    let inputs = [
        "0,0,0,0,0,0,0",
        "-168,-60,320,0,0,0,0",
        "598.1,73.7,418.2,0.202,0.045,-2.455,6.7",
    ];
    c.bench_function("classify_towgs84", |b| {
        b.iter(|| {
            for s in &inputs {
                black_box(ShiftOperation::from_towgs84(black_box(s)).unwrap());
            }
        });
    });
}

fn bench_build_handle(c: &mut Criterion) {
    let params: ParameterSet = DEFINITIONS[0].1.parse().unwrap();
    let crs = create_crs("bench", &params).unwrap();
    c.bench_function("projection_handle_utm", |b| {
        b.iter(|| black_box(ProjectionHandle::from_crs(black_box(&crs)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_create_crs,
    bench_parse_definition,
    bench_classify_towgs84,
    bench_build_handle
);
criterion_main!(benches);
