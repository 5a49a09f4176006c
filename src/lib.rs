//! drivelink - map local `file://` paths to their copies in Google Drive.
//!
//! The core is [`resolver::PathResolver`], which reconciles a slash-separated
//! local path against the records returned by one broad Drive search, and
//! [`cache::SessionCache`], which keeps recent results per browsing session.

pub mod cache;
pub mod config;
pub mod drive;
pub mod error;
pub mod link;
pub mod logging;
pub mod providers;
pub mod resolver;
pub mod shell;
