//! Core services: classification/dispatch, composition, and item writing.

pub mod compose;
pub mod dispatch;
pub mod writer;

pub use dispatch::{
    DispatchConfig, DispatchOutcome, DispatchPolicy, NotificationDispatcher, DISPATCH_POLICY,
};
pub use writer::ItemWriter;
