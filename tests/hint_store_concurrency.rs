// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use inhibit::{Hint, HintStore};
use std::fs::{File, OpenOptions};
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const BLOCKED_PROBE: Duration = Duration::from_millis(200);
const COMPLETION_LIMIT: Duration = Duration::from_secs(10);

fn temp_store() -> (TempDir, HintStore) {
    let temp = TempDir::new().unwrap();
    let store = HintStore::for_root(temp.path());
    (temp, store)
}

fn open_hint_file(store: &HintStore, resource: &str) -> File {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(store.hint_file_path(resource))
        .unwrap()
}

#[test]
fn concurrent_writers_never_interleave_bytes() {
    let (_temp, store) = temp_store();
    let hints: Vec<String> = vec!["a".repeat(4096), "b".repeat(8192), "c".repeat(64)];
    store
        .lock_with_hint("pkg-a", &Hint::new(hints[0].clone()))
        .unwrap();

    let rounds = 50;
    let barrier = Arc::new(Barrier::new(hints.len() + 2));
    let mut workers = Vec::new();

    for hint in &hints {
        let store = store.clone();
        let barrier = Arc::clone(&barrier);
        let hint = Hint::new(hint.clone());
        workers.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..rounds {
                store.lock_with_hint("pkg-a", &hint).unwrap();
            }
        }));
    }

    for _ in 0..2 {
        let store = store.clone();
        let barrier = Arc::clone(&barrier);
        let hints = hints.clone();
        workers.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..rounds {
                let observed = store.is_locked("pkg-a").unwrap();
                assert!(
                    hints.iter().any(|hint| hint == observed.as_str()),
                    "observed torn hint of {} bytes",
                    observed.as_str().len()
                );
            }
        }));
    }

    for worker in workers {
        worker.join().unwrap();
    }

    let last = store.is_locked("pkg-a").unwrap();
    assert!(hints.iter().any(|hint| hint == last.as_str()));
}

#[test]
fn readers_proceed_while_another_reader_holds_shared_lock() {
    let (_temp, store) = temp_store();
    store
        .lock_with_hint("pkg-a", &Hint::INHIBITED_FOR_REFRESH)
        .unwrap();

    let holder = open_hint_file(&store, "pkg-a");
    holder.lock_shared().unwrap();

    let readers = 8;
    let barrier = Arc::new(Barrier::new(readers));
    let (tx, rx) = mpsc::channel();
    for _ in 0..readers {
        let store = store.clone();
        let barrier = Arc::clone(&barrier);
        let tx = tx.clone();
        thread::spawn(move || {
            barrier.wait();
            tx.send(store.is_locked("pkg-a").unwrap()).unwrap();
        });
    }
    drop(tx);

    for _ in 0..readers {
        let hint = rx.recv_timeout(COMPLETION_LIMIT).unwrap();
        assert_eq!(hint, Hint::INHIBITED_FOR_REFRESH);
    }
    holder.unlock().unwrap();
}

#[test]
fn reader_waits_for_exclusive_holder() {
    let (_temp, store) = temp_store();
    store.lock_with_hint("pkg-a", &Hint::new("remove")).unwrap();

    let holder = open_hint_file(&store, "pkg-a");
    holder.lock().unwrap();

    let (tx, rx) = mpsc::channel();
    let reader = {
        let store = store.clone();
        thread::spawn(move || {
            tx.send(store.is_locked("pkg-a").unwrap()).unwrap();
        })
    };

    assert!(rx.recv_timeout(BLOCKED_PROBE).is_err());
    holder.unlock().unwrap();

    assert_eq!(
        rx.recv_timeout(COMPLETION_LIMIT).unwrap(),
        Hint::new("remove")
    );
    reader.join().unwrap();
}

#[test]
fn writer_waits_for_shared_holder() {
    let (_temp, store) = temp_store();
    store
        .lock_with_hint("pkg-a", &Hint::INHIBITED_FOR_REFRESH)
        .unwrap();

    let holder = open_hint_file(&store, "pkg-a");
    holder.lock_shared().unwrap();

    let (tx, rx) = mpsc::channel();
    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            store.lock_with_hint("pkg-a", &Hint::new("remove")).unwrap();
            tx.send(()).unwrap();
        })
    };

    assert!(rx.recv_timeout(BLOCKED_PROBE).is_err());
    // Still the old hint while the writer is parked on the lock.
    assert_eq!(
        std::fs::read(store.hint_file_path("pkg-a")).unwrap(),
        b"refresh"
    );
    holder.unlock().unwrap();

    rx.recv_timeout(COMPLETION_LIMIT).unwrap();
    writer.join().unwrap();
    assert_eq!(store.is_locked("pkg-a").unwrap(), Hint::new("remove"));
}

#[test]
fn unlock_waits_for_exclusive_holder() {
    let (_temp, store) = temp_store();
    store
        .lock_with_hint("pkg-a", &Hint::INHIBITED_FOR_REFRESH)
        .unwrap();

    let holder = open_hint_file(&store, "pkg-a");
    holder.lock().unwrap();

    let (tx, rx) = mpsc::channel();
    let clearer = {
        let store = store.clone();
        thread::spawn(move || {
            store.unlock("pkg-a").unwrap();
            tx.send(()).unwrap();
        })
    };

    assert!(rx.recv_timeout(BLOCKED_PROBE).is_err());
    holder.unlock().unwrap();

    rx.recv_timeout(COMPLETION_LIMIT).unwrap();
    clearer.join().unwrap();
    assert_eq!(store.is_locked("pkg-a").unwrap(), Hint::NOT_INHIBITED);
}

#[test]
fn failed_operation_releases_lock() {
    let (_temp, store) = temp_store();
    store.lock_with_hint("pkg-a", &Hint::new("remove")).unwrap();
    std::fs::write(store.hint_file_path("pkg-a"), [0xff, 0xfe, 0xfd]).unwrap();

    assert!(store.is_locked("pkg-a").is_err());

    let file = open_hint_file(&store, "pkg-a");
    file.try_lock().unwrap();
    file.unlock().unwrap();
}
