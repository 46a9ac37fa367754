//! # EduAssist Core
//!
//! Domain types, traits, and error definitions for the EduAssist teaching
//! assistant. This crate has **no I/O** — it defines the data tree that every
//! other crate reads and writes, plus the seams (provider, clock, id source)
//! that the rest of the workspace implements against.
//!
//! ## Layout
//!
//! - [`store::DataStore`] — the single tree of classes, projects, knowledge,
//!   students, rules, conversations and activity
//! - [`provider::Provider`] — the remote assistant call
//! - [`persistence::Persistence`] — load and save of the whole tree
//! - [`clock::Clock`] and [`ids::IdSource`] — injected capabilities so that
//!   timestamps and generated identifiers are deterministic under test

pub mod activity;
pub mod classroom;
pub mod clock;
pub mod conversation;
pub mod error;
pub mod ids;
pub mod knowledge;
pub mod persistence;
pub mod provider;
pub mod rules;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use activity::{ActivityEntry, ActivityKind, DEFAULT_ACTIVITY_CAP};
pub use classroom::{Class, Project, Student};
pub use clock::{Clock, FixedClock, SystemClock};
pub use conversation::{ConversationKey, ConversationScope, ConversationTurn, TurnRole};
pub use error::{ChatError, ClassroomError, Error, ProviderError, Result, StoreError};
pub use ids::{IdSource, RandomIds, CLASS_CODE_ALPHABET, CLASS_CODE_LEN};
pub use knowledge::KnowledgeItem;
pub use persistence::Persistence;
pub use provider::{AssistantRequest, Provider, ProviderResponse, RequestMessage, Usage};
pub use rules::RuleSet;
pub use store::DataStore;
