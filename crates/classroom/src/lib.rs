//! The EduAssist application facade.
//!
//! [`Classroom`] owns the data tree and every collaborator that touches it:
//! persistence, the remote provider, the clock and the id source. Teacher
//! actions (classes, projects, knowledge, rules) and student actions (join,
//! chat) are methods on it, and [`Command`] wraps each one as a value so a
//! front end can dispatch actions without stringly-typed branching.
//!
//! Every mutating action saves the whole tree afterwards. A failed save is
//! logged and never fails the action.

pub mod classroom;
pub mod command;
pub mod demo;
pub mod student;
pub mod teacher;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classroom::{Classroom, ClassroomBuilder};
pub use command::{Command, CommandOutput};
pub use teacher::{NewClass, NewKnowledge, NewProject, RuleScope};
pub use views::{
    ActivityLine, ClassStats, ClassSummary, Overview, ProjectSummary, format_relative,
};
