// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute store and configuration file integration tests.

use property_info::{
    AttributeStore, ByteOrderMode, CodecConfig, DirAttributeStore, PropertyEntry, PropertyInfo,
    PropertyInfoError, ValueEntry, PROPERTY_INFO_TYPE,
};

const GET: u32 = 0x5047_4554; // 'PGET'

fn sample() -> (Vec<PropertyEntry<'static>>, Vec<ValueEntry<'static>>) {
    let props = vec![
        PropertyEntry::named("Suites")
            .with_usage("supported suites")
            .with_command(GET)
            .expect("command"),
        PropertyEntry::named("Messenger").with_extra_data(9),
    ];
    let values = vec![ValueEntry::named("get", GET)];
    (props, values)
}

#[test]
fn dir_store_roundtrip() {
    let _ = env_logger::try_init();

    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = DirAttributeStore::new(dir.path().join("app")).expect("open store");

    let (props, values) = sample();
    let info = PropertyInfo::new(Some(props.as_slice()), Some(values.as_slice()));
    info.store_attr(&mut store, "be:suites").expect("store");

    let mut loaded = PropertyInfo::empty();
    loaded.load_attr(&store, "be:suites").expect("load");
    assert!(loaded.is_owned());
    assert_eq!(loaded.properties(), info.properties());
    assert_eq!(loaded.values(), info.values());

    let raw = store.read_attr("be:suites").expect("raw attr");
    assert_eq!(raw.len(), info.flattened_size());
}

#[test]
fn missing_attribute_leaves_container_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = DirAttributeStore::new(dir.path()).expect("open store");

    let (props, values) = sample();
    let mut info = PropertyInfo::new(Some(props.as_slice()), Some(values.as_slice()));
    let err = info.load_attr(&store, "absent").unwrap_err();
    assert!(matches!(err, PropertyInfoError::NotFound(_)));
    assert_eq!(info.count_properties(), 2);
    assert!(!info.is_owned());
}

#[test]
fn corrupt_attribute_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = DirAttributeStore::new(dir.path()).expect("open store");
    store
        .write_attr("broken", &[0, 0xFF, 0xFF, 0xFF, 0xFF, 1, 0, 0, 0])
        .expect("write");

    let mut info = PropertyInfo::empty();
    let err = info.load_attr(&store, "broken").unwrap_err();
    assert!(matches!(err, PropertyInfoError::InvalidData(_)));
    assert!(!info.is_owned());
}

#[test]
fn config_file_drives_byte_order_and_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("codec.toml");
    std::fs::write(&path, "byte_order = \"big_endian\"\nmax_blob_size = 64\n").expect("write");
    let config = CodecConfig::from_file(&path).expect("load config");
    assert_eq!(config.byte_order, ByteOrderMode::BigEndian);

    let (props, values) = sample();
    let info = PropertyInfo::new(Some(props.as_slice()), Some(values.as_slice()));
    let mut bytes = vec![0u8; info.flattened_size()];
    info.flatten_with(&config, Some(bytes.as_mut_slice()))
        .expect("flatten");
    assert_eq!(bytes[0], 1);

    assert_eq!(bytes.len(), 107);

    let mut decoded = PropertyInfo::empty();
    let err = decoded
        .unflatten_with(&config, PROPERTY_INFO_TYPE, Some(bytes.as_slice()))
        .unwrap_err();
    assert!(matches!(err, PropertyInfoError::InvalidData(_)));
    decoded
        .unflatten_with(&CodecConfig::default(), PROPERTY_INFO_TYPE, Some(bytes.as_slice()))
        .expect("unflatten");
    assert_eq!(decoded.properties(), info.properties());
}

#[test]
fn missing_config_file_is_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = CodecConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, PropertyInfoError::Config(_)));
}
