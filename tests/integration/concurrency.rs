//! Resolution over shared layers from several threads

use benchtier::layer;
use benchtier::settings::{Iterations, TimeUnit, WarmupIterations};
use benchtier::{resolve, PrecedenceChain, Registry, Tier};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_resolution_matches_sequential() {
    let registry = Arc::new(Registry::builtin());
    let custom = layer![Iterations(10), TimeUnit::Us];
    let suite = layer![Iterations(20)];
    let cli = layer![WarmupIterations(3)];
    let benchmarks: Vec<_> = (0..8u64).map(|i| layer![Iterations(100 + i)]).collect();

    thread::scope(|scope| {
        let handles: Vec<_> = benchmarks
            .iter()
            .map(|bench| {
                let registry = Arc::clone(&registry);
                let (custom, suite, cli) = (&custom, &suite, &cli);
                scope.spawn(move || {
                    let chain = PrecedenceChain::new()
                        .with_custom_defaults(custom)
                        .with_suite(suite)
                        .with_benchmark(bench)
                        .with_cli(cli);
                    resolve(&registry, &chain)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let config = handle.join().unwrap();
            assert_eq!(config.get::<Iterations>(), &Iterations(100 + i as u64));
            assert_eq!(config.get::<TimeUnit>(), &TimeUnit::Us);
            assert_eq!(config.get::<WarmupIterations>(), &WarmupIterations(3));
            assert_eq!(config.origin::<TimeUnit>(), Some(Tier::CustomDefaults));
        }
    });

    // Layers are untouched by resolution.
    assert_eq!(suite.get::<Iterations>(), Some(&Iterations(20)));
    assert_eq!(custom.len(), 2);
}
