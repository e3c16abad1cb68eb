// SPDX-License-Identifier: MPL-2.0
//! Process-level wiring of the viewer.
//!
//! [`ViewerContext`] builds the adapters once per process and hands out one
//! [`ViewerSession`] per viewed file. Presentation layers bind their controls
//! to the session's navigator and call [`ViewerSession::teardown`] when the
//! view goes away.

pub mod paths;
pub mod session;

pub use session::{ViewerContext, ViewerSession};
