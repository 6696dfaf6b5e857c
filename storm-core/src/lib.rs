//! storm-core: event classification, damage decoding, and per-category ranking

pub mod model;
pub mod classifier;
pub mod decoder;
pub mod aggregate;
pub mod rank;
pub mod tidy;
pub mod pipeline;

pub use model::{Category, Metric, RawRecord, View};
pub use classifier::{classify, is_fallback, Rule, RULES};
pub use decoder::{decode, multiplier};
pub use aggregate::{aggregate, AggregateRow, Aggregation};
pub use rank::{rank, DEFAULT_TOP_N};
pub use tidy::{reshape, TidyRow};
pub use pipeline::{run, summarize, Report};
