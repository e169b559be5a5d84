// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use property_info::{PropertyInfo, PROPERTY_INFO_TYPE};

fuzz_target!(|data: &[u8]| {
    let mut info = PropertyInfo::empty();
    if info.unflatten(PROPERTY_INFO_TYPE, Some(data)).is_ok() {
        // Anything accepted must re-flatten to exactly its computed size.
        let bytes = info.flatten_to_vec().expect("reflatten decoded tables");
        assert_eq!(bytes.len(), info.flattened_size());
    }
    info.release();
});
