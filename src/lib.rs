// SPDX-License-Identifier: MPL-2.0
//! `flfm_viewer` is the media navigation client of the FLFM web file manager.
//!
//! It keeps a cached, doubly-linked list of the sibling files of the one being
//! viewed, steps through it, drives a timed slideshow and negotiates video
//! playback with the server. Rendering is left to the embedding front end.

#![doc(html_root_url = "https://docs.rs/flfm_viewer/0.3.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod routing;

#[cfg(test)]
mod test_utils;
