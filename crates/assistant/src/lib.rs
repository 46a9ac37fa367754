//! The knowledge-retrieval and context-assembly core of EduAssist.
//!
//! A student question flows through these pieces in order:
//!
//! 1. **Filter** the class knowledge down to the candidates visible in scope
//! 2. **Compose** the layered prompt (rules, knowledge, instruction, question)
//! 3. **Ask** the remote provider exactly once
//! 4. On any failure, **match** the question against the same candidates
//! 5. **Record** both turns in the conversation ledger
//!
//! Everything except step 3 is a pure function over the data tree.

pub mod chat;
pub mod composer;
pub mod filter;
pub mod ledger;
pub mod matcher;

pub use chat::{
    ChatReply, ChatSettings, InFlight, PreparedTurn, ReplySource, SendGuard, SubmissionState,
};
pub use composer::compose;
pub use filter::{FilterMode, catalog, filter, quick_info};
pub use matcher::{
    DUE_DATE_DEFLECTION, GENERIC_DEFLECTION, SUBMISSION_DEFLECTION, fallback_reply, find_match,
};
