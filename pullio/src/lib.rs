// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ## How it works
//!
//! Data is pulled from a *source* by a [`Reader`], one *segment* at a time. Every
//! segment carries the elements obtained and whether the end of the source was
//! reached. Elements are bytes (`u8`) or characters (`char`); everything is
//! written once over the [`Element`] trait.
//!
//! ### Sources
//!
//! Sources come in two kinds. *Bounded* sources, slices and [`Bytes`] buffers,
//! know their length up front. Their segments borrow the original storage
//! without copying, and report the end exactly with the last of the data.
//! *Streaming* sources read from a [`Channel`] whose length is unknown. Their
//! segments borrow a private staging region, and the end is only known when the
//! channel reports it; a read that exactly drains the channel may not be flagged
//! as the end, leaving the next read to return an empty segment flagged as the
//! end. The end is never reported more than one read late.
//!
//! A channel may return zero elements without having ended. The streaming source
//! keeps reading until its request is filled or the channel ends, giving up after
//! a number of zero-length reads in a row (see [`StreamOptions`]).
//!
//! ### Builders
//!
//! A [`Builder`] is a growable element buffer, usable standalone or as a sink
//! for [`Reader::read_to`]. Growth doubles capacity, clamped to an optional
//! maximum; a builder with a maximum is *fixed*, and fails rather than growing
//! past it.
//!
//! ### Sinks
//!
//! Readers move data into anything implementing [`Sink`]: fixed slices, byte
//! buffers, writers, strings, and builders. Bounded sinks limit how much a
//! reader moves.
//!
//! [`Bytes`]: https://docs.rs/bytes/latest/bytes/struct.Bytes.html

mod builder;
mod channel;
mod element;
mod error;
mod reader;
mod segment;
pub mod sink;
pub mod source;

pub use builder::*;
pub use channel::*;
pub use element::*;
pub use error::*;
pub use reader::*;
pub use segment::*;
pub use sink::{Sink, void_sink};
pub use source::{Source, SliceSource, SliceMutSource, StreamOptions, StreamSource};
#[cfg(feature = "bytes")]
pub use source::BytesSource;
