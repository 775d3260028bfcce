//! Counting of debounced rising edges of two sensors, and passing of the
//! resulting progress to a display.
//!
//! It is mainly targetted to run in a firmware where edges are reported from
//! interrupts and the display is refreshed from a slower loop. Parts of it,
//! such as the disc rule, are useful in software as well.
//!
//! Following is the communication between contexts as used in the firmware:
//!
//! ```text
//!     [ EXTI A ]           [ EXTI B ]
//!         |                    |
//!         V                    V
//!    +---------- {Counter} ---------+ <------ (reset) ------+
//!    |                              |                       |
//!    | (StepChanged)  (StepChanged) |                       |
//!    V                              V                       |
//! [Outbox A]                    [Outbox B]                  |
//!    |                              |                       |
//!    +----------> [Inbox] <---------+                       |
//!                    |                                      |
//!                    V                                      |
//!              [ ControlLoop {Display} ] -------------------+
//!                 |            A
//!               [LEDs]      [Button]
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod bucket;
pub mod button;
pub mod channel;
pub mod config;
pub mod counter;
pub mod disc;
pub mod display;
pub mod edge;
mod log;
pub mod mailbox;
pub mod tick;

pub use crate::bucket::bucket;
pub use crate::button::Button;
pub use crate::channel::{Channel, UnknownChannel};
pub use crate::config::Config;
pub use crate::counter::{Counter, Snapshot};
pub use crate::display::Display;
pub use crate::edge::{EdgeEvent, Level};
pub use crate::mailbox::{Inbox, Mailbox, Outbox, PostError, StepChanged};
pub use crate::tick::Tick;
