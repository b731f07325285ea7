pub mod aggregator;
pub mod cleaner;
pub mod history;
pub mod period_range;
