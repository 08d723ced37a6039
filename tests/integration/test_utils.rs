//! Shared helpers for integration tests

use benchtier::layer;
use benchtier::settings::{Format, Quiet};
use benchtier::{Layer, Runner, Suite};

/// Run `suite` with `cli` on top of a quiet, report-less base and check the number of
/// measurements recorded for each benchmark, in declaration order.
pub fn assert_iteration_counts(suite: Suite, expected: &[usize], cli: Layer, custom_defaults: Layer) {
    let cli = layer![Format::None, Quiet(true)].merged(&cli);
    let runner = Runner::new(vec![suite])
        .with_cli(cli)
        .with_custom_defaults(custom_defaults);

    let results = runner.run().unwrap();
    assert_eq!(results.len(), expected.len());

    let counts: Vec<usize> = results.iter().map(|r| r.measurements.len()).collect();
    assert_eq!(counts, expected);
}
