// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures flatten, unflatten and request matching on a schema with a
//! realistic mix of properties, compound types and values.

#![allow(clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use property_info::{
    ByteOrderMode, CodecConfig, CompoundType, PropertyEntry, PropertyInfo, TypeField, ValueEntry,
    PROPERTY_INFO_TYPE,
};

const GET: u32 = 0x5047_4554;
const SET: u32 = 0x5053_4554;
const INT32: u32 = 0x4C4F_4E47;

fn schema() -> (Vec<PropertyEntry<'static>>, Vec<ValueEntry<'static>>) {
    let props = (0..32u32)
        .map(|i| {
            let shape = CompoundType::new()
                .with_field(TypeField::owned("x", INT32))
                .and_then(|shape| shape.with_field(TypeField::owned("y", INT32)))
                .expect("shape");
            PropertyEntry::named(format!("Property{i}"))
                .with_usage("benchmark property")
                .with_extra_data(i)
                .with_command(GET)
                .and_then(|entry| entry.with_command(SET))
                .and_then(|entry| entry.with_specifier(1))
                .and_then(|entry| entry.with_type(INT32))
                .and_then(|entry| entry.with_compound_type(shape))
                .expect("entry")
        })
        .collect();
    let values = (0..16u32)
        .map(|i| ValueEntry::named(format!("value{i}"), i + 1))
        .collect();
    (props, values)
}

fn bench_flatten(c: &mut Criterion) {
    let (props, values) = schema();
    let info = PropertyInfo::new(Some(props.as_slice()), Some(values.as_slice()));
    let mut buffer = vec![0u8; info.flattened_size()];

    c.bench_function("flatten_native", |b| {
        b.iter(|| info.flatten(Some(black_box(buffer.as_mut_slice()))))
    });
}

fn bench_unflatten(c: &mut Criterion) {
    let (props, values) = schema();
    let info = PropertyInfo::new(Some(props.as_slice()), Some(values.as_slice()));
    let native = info.flatten_to_vec().expect("flatten");

    let foreign_config = CodecConfig::default().with_byte_order(ByteOrderMode::foreign());
    let mut foreign = vec![0u8; info.flattened_size()];
    info.flatten_with(&foreign_config, Some(foreign.as_mut_slice()))
        .expect("flatten foreign");

    c.bench_function("unflatten_native", |b| {
        b.iter(|| {
            let mut decoded = PropertyInfo::empty();
            decoded
                .unflatten(PROPERTY_INFO_TYPE, Some(black_box(native.as_slice())))
                .expect("unflatten");
            decoded
        })
    });
    c.bench_function("unflatten_swapped", |b| {
        b.iter(|| {
            let mut decoded = PropertyInfo::empty();
            decoded
                .unflatten(PROPERTY_INFO_TYPE, Some(black_box(foreign.as_slice())))
                .expect("unflatten");
            decoded
        })
    });
}

fn bench_find_match(c: &mut Criterion) {
    let (props, values) = schema();
    let info = PropertyInfo::new(Some(props.as_slice()), Some(values.as_slice()));

    c.bench_function("find_match_last", |b| {
        b.iter(|| info.find_match(black_box(GET), 0, 1, black_box("Property31")))
    });
}

criterion_group!(benches, bench_flatten, bench_unflatten, bench_find_match);
criterion_main!(benches);
