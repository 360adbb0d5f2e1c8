//! Many executors sharing one vault.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use watchvault::{
    Command, DomainKind, Executor, MemoryBackend, Output, RetryConfig, Vault, VaultConfig,
};

const THREADS: usize = 6;
const PER_THREAD: usize = 15;

#[test]
fn concurrent_creates_through_executors_all_survive() {
    let cfg = VaultConfig::default().with_retry(RetryConfig {
        max_retries: 10_000,
        base_delay_ms: 0,
        max_delay_ms: 1,
    });
    let vault = Vault::open(Arc::new(MemoryBackend::new()), cfg).unwrap();
    Executor::new(Arc::clone(&vault))
        .execute(Command::CreateRoot {
            domain: DomainKind::Providers,
        })
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let executor = Executor::new(Arc::clone(&vault));
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|_| {
                        match executor
                            .execute(Command::CreateProvider {
                                brand: None,
                                website: None,
                                country_origin: None,
                            })
                            .unwrap()
                        {
                            Output::Child { key, .. } => key,
                            other => panic!("Expected Child, got {:?}", other),
                        }
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let keys: HashSet<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(keys.len(), THREADS * PER_THREAD);

    match Executor::new(vault)
        .execute(Command::ListChildren {
            domain: DomainKind::Providers,
        })
        .unwrap()
    {
        Output::Keys(listed) => {
            assert_eq!(listed.len(), THREADS * PER_THREAD);
            assert!(listed.iter().all(|k| keys.contains(k)));
        }
        other => panic!("Expected Keys, got {:?}", other),
    }
}
