mod command;
mod context;
mod display;
mod error;
mod scene;
mod sink;
mod slice_view;
mod traces;

#[cfg(test)]
mod tests;

pub use command::{Command, MergeTag, ValueChange};
pub use context::Workspace;
pub use display::{ColorMap, DisplaySettings, DrawMode, TracingLayer};
pub use error::{Result, RuntimeError};
pub use scene::Scene;
pub use sink::PresentationSink;
pub use slice_view::{SliceView, ViewId};
pub use traces::{TraceKey, TracePoint, TraceStore, TraceStroke};
