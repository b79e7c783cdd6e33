use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use uni2ascii_core::{Table, Transliterator};

// First use races from many threads; all must see the same, complete table.
#[test]
fn concurrent_first_use_builds_once() {
    let workers = 8;
    let (tx, rx) = bounded::<(usize, String)>(workers);
    let mut handles = Vec::new();
    for _ in 0..workers {
        let tx = tx.clone();
        handles.push(thread::spawn(move || {
            let t = Transliterator::builtin();
            let ptr = t.table() as *const Table as usize;
            tx.send((ptr, t.transliterate("Ærøskøbing — “ﬁne”"))).unwrap();
        }));
    }
    drop(tx);
    for h in handles {
        h.join().unwrap();
    }

    let results: Vec<(usize, String)> = rx.iter().collect();
    assert_eq!(results.len(), workers);
    let (first_ptr, first_out) = &results[0];
    for (ptr, out) in &results {
        assert_eq!(ptr, first_ptr);
        assert_eq!(out, first_out);
    }
    assert_eq!(first_out, "AEr\u{f8}sk\u{f8}bing - \"fine\"");
}

#[test]
fn shared_table_is_one_allocation() {
    let a = Table::shared();
    let b = Table::shared();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.len(), 146);
}
