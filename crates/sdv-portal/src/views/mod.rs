//! Plain-text renderings of the platform's screens.
//!
//! Every view is a pure function from domain objects to a `String`, so the
//! command handlers only fetch and print.

pub mod badges;
pub mod dashboard;
pub mod documents;
pub mod forms;
pub mod login;
pub mod navbar;
pub mod studies;
pub mod study_detail;
