//! Agentation - point-and-annotate overlay for development builds
//!
//! Attaches to a host UI surface, lets a developer click nodes and leave
//! comments on them, keeps numbered markers pinned to the annotated nodes
//! while the surface scrolls and re-flows, and exports everything as a
//! Markdown report for pasting into a chat with a coding agent.
//!
//! The engine is host-agnostic: a host implements [`host::Surface`] and feeds
//! pointer, keyboard and geometry signals into an [`Engine`]. An in-memory
//! host ([`host::MemoryTree`]) is included for tests and the demo binary; the
//! browser adapter lives behind `target_arch = "wasm32"`.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod feedback;
pub mod gate;
pub mod host;
pub mod interaction;
pub mod keybindings;
pub mod model;
pub mod panel;
pub mod path;
pub mod store;

pub use config::{AgentationConfig, ConfigError, LogLevel};
pub use engine::Engine;
pub use error::{ClipboardError, EngineError};
pub use export::{ReportFormat, ReportRegistry, export_markdown};
pub use feedback::{Clipboard, CopyPulse, MemoryClipboard};
pub use host::{MemoryTree, NodeId, NodeSpec, NodeTree, Surface};
pub use interaction::{
    ActiveState, ChromePart, CommitOutcome, EventDisposition, InteractionState, KeyContext,
    PointerTarget,
};
pub use model::{AnnotationId, AnnotationRecord};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
