pub mod chart;
pub mod granularity;
pub mod history;
pub mod metric;
pub mod observation;
pub mod period;
pub mod station;
pub mod value;
