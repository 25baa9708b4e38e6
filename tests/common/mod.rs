#![allow(dead_code)]

use std::error::Error;

use sha2::{Digest, Sha256};

pub use dirview_test_utils::builders::{MockTreeBuilder, TreeBuilder};
pub use dirview_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn Error>>;

pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("{:x}", Sha256::digest(bytes.as_ref()))
}

/// Directory digest of files with the given contents, in this order.
pub fn folded(contents: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for c in contents {
        hasher.update(sha256_hex(c).as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

pub fn collect<T, E: std::fmt::Debug>(iter: impl Iterator<Item = Result<T, E>>) -> Vec<T> {
    iter.map(|r| r.expect("walk failed")).collect()
}

pub fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}
