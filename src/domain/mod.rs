// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core types with no I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde` derives for the wire format it depends only on `std`.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaEntry`](media::MediaEntry), [`MediaList`](media::MediaList),
//!   [`MediaKind`](media::MediaKind), [`MediaInfo`](media::MediaInfo))
//! - [`viewer`]: Viewer value objects ([`SlideshowDelay`](viewer::SlideshowDelay),
//!   [`VideoTimeout`](viewer::VideoTimeout))

pub mod media;
pub mod viewer;
