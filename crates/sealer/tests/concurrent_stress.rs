//! Encode/decode from many threads sharing one key.
//!
//! Every call builds its own cipher instance, so no coordination is needed.

use std::sync::{Arc, Barrier};
use std::thread;

use sealer::{decode, encode, import_key};

const KEY: &str = "//iQh9KYe7pM+mevjifZPrm7YE2+rRloG1E15zzjR88=";

#[test]
fn concurrent_round_trips_share_a_key() {
    let key = Arc::new(import_key(KEY).unwrap());
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let key = Arc::clone(&key);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..50 {
                    let plaintext = format!("thread={t}\niteration={i}");
                    let payload = encode(&key, &plaintext);
                    assert_eq!(decode(&key, &payload).unwrap(), plaintext);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}

#[test]
fn concurrent_encodes_produce_unique_payloads() {
    let key = Arc::new(import_key(KEY).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let key = Arc::clone(&key);
            thread::spawn(move || (0..100).map(|_| encode(&key, "same")).collect::<Vec<_>>())
        })
        .collect();

    let mut payloads = std::collections::HashSet::new();
    for handle in handles {
        for payload in handle.join().expect("worker thread panicked") {
            assert!(payloads.insert(payload), "duplicate payload across threads");
        }
    }
    assert_eq!(payloads.len(), 800);
}
