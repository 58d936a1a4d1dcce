//! Messages leaving the simulation core.
//!
//! - [`heal`] – heal effect spawn requests sent by healers at the end of a
//!   healing cycle

pub mod heal;
