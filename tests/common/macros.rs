/// Asserts that the process has fixated on the given strategy name.
#[macro_export]
macro_rules! assert_fixated_on {
    ($process:expr, $name:expr) => {
        assert!($process.fixated(), "Process has not fixated");
        assert_eq!(
            $process.winning_strategy_name().as_deref(),
            Some($name),
            "Unexpected winning strategy"
        );
    };
}

/// Asserts that every recorded snapshot counts exactly `$size` agents.
#[macro_export]
macro_rules! assert_population_size {
    ($process:expr, $size:expr) => {
        for (i, snapshot) in $process.populations().iter().enumerate() {
            let total: usize = snapshot.values().sum();
            assert_eq!(total, $size, "Snapshot {} has {} agents", i, total);
        }
    };
}

/// Asserts that two processes recorded bit-identical histories.
#[macro_export]
macro_rules! assert_same_trajectory {
    ($a:expr, $b:expr) => {
        assert_eq!($a.populations(), $b.populations(), "Population histories differ");
        assert_eq!(
            $a.history().digest(),
            $b.history().digest(),
            "History digests differ"
        );
    };
}
