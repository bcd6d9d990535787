/// Codec throughput, and the fixed-width `Value128` paths against the generic codec.
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, rng};

use stdext::encoding::{BaseEncoding, base16, base32, base64};
use stdext::value128::{Value128, convert};

const SIZES: [usize; 3] = [16, 1024, 64 * 1024];

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rng();
    (0..len).map(|_| rng.random()).collect()
}

fn encodings() -> [(&'static str, &'static BaseEncoding); 4] {
    [
        ("base16_hex", &base16::HEX),
        ("base32_crockford", &base32::CROCKFORD),
        ("base64_mime", &base64::MIME),
        ("base64_url", &base64::URL),
    ]
}

pub fn encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in SIZES {
        let data = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        for (name, enc) in encodings() {
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| std::hint::black_box(enc.encode(data)))
            });
        }
    }
    group.finish();
}

pub fn decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in SIZES {
        let data = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        for (name, enc) in encodings() {
            let text = enc.encode(&data);
            group.bench_with_input(BenchmarkId::new(name, size), &text, |b, text| {
                b.iter(|| std::hint::black_box(enc.decode(text)))
            });
        }
    }
    group.finish();
}

pub fn value128_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("value128_text");
    group.throughput(Throughput::Elements(1));

    let mut rng = rng();
    let values: Vec<Value128> = (0..1024)
        .map(|_| Value128::new(rng.random(), rng.random()))
        .collect();

    group.bench_function("base64_fixed", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % values.len();
            std::hint::black_box(convert::try_to_base64_string(values[i], &base64::URL))
        })
    });
    group.bench_function("base64_generic", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % values.len();
            std::hint::black_box(base64::URL.encode(&convert::to_byte_array(values[i])))
        })
    });
    group.bench_function("base32_fixed", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % values.len();
            std::hint::black_box(convert::try_to_base32_string(values[i], &base32::CROCKFORD))
        })
    });
    group.bench_function("base32_generic", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % values.len();
            std::hint::black_box(base32::CROCKFORD.encode(&convert::to_byte_array(values[i])))
        })
    });

    let texts: Vec<String> = values
        .iter()
        .filter_map(|v| convert::try_to_base64_string(*v, &base64::URL))
        .collect();
    group.bench_function("base64_fixed_decode", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % texts.len();
            std::hint::black_box(convert::try_from_base64_string(&texts[i], &base64::URL))
        })
    });
    group.bench_function("base64_generic_decode", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % texts.len();
            std::hint::black_box(base64::URL.decode(&texts[i]))
        })
    });

    group.finish();
}

criterion_group!(benches, encode, decode, value128_text);
criterion_main!(benches);
