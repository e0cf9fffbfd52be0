// SPDX-License-Identifier: Apache-2.0

//! Source adapters. Every origin is reduced to one primitive, [`Source::pull`],
//! which returns at most the requested number of elements and whether the end of
//! the source was reached.
//!
//! Bounded sources ([`SliceSource`], [`SliceMutSource`], and [`BytesSource`])
//! know their length up front, so their end flag is exact and their segments
//! share memory with the original storage. Streaming sources ([`StreamSource`])
//! only know their end once a pull observes it, and copy into a private staging
//! region.

mod slice;
#[cfg(feature = "bytes")]
mod buf;
mod stream;

pub use slice::*;
#[cfg(feature = "bytes")]
pub use buf::*;
pub use stream::*;

use std::cmp::min;
use std::ops::Range;
use crate::element::Element;
use crate::error::{Error, OperationKind::Create, Result};
use crate::segment::Segment;

/// A data source read by a [`Reader`](crate::Reader).
pub trait Source {
	type Elem: Element;

	/// Pulls at most `count` elements. The returned segment's end flag is `true`
	/// only if the source is known to have no more elements.
	fn pull(&mut self, count: usize) -> Result<Segment<'_, Self::Elem>>;

	/// Discards at most `count` elements, returning the number discarded and
	/// whether the end was reached.
	fn discard(&mut self, count: usize) -> Result<(usize, bool)>;

	/// Returns the number of elements left, if known.
	fn remaining(&self) -> Option<usize> { None }

	/// Returns the preferred size of each pull when moving data in bulk.
	fn chunk_size(&self) -> usize { usize::MAX }

	/// Returns `true` if the source can rewind to a mark.
	fn mark_supported(&self) -> bool;

	/// Marks the current position.
	fn mark(&mut self) -> Result;

	/// Rewinds to the last mark.
	fn reset(&mut self) -> Result;

	/// Releases resources held by the source. Closing is idempotent.
	fn close(&mut self) -> Result { Ok(()) }
}

/// Tracks the read position of a bounded source.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Cursor {
	pos: usize,
	mark: usize,
	len: usize,
}

impl Cursor {
	pub fn new(len: usize) -> Self {
		Self { pos: 0, mark: 0, len }
	}

	pub fn remaining(&self) -> usize { self.len - self.pos }

	pub fn is_end(&self) -> bool { self.pos == self.len }

	/// Advances by at most `count`, returning the range passed over.
	pub fn advance(&mut self, count: usize) -> Range<usize> {
		let start = self.pos;
		self.pos += min(count, self.remaining());
		start..self.pos
	}

	pub fn mark(&mut self) { self.mark = self.pos }

	pub fn reset(&mut self) { self.pos = self.mark }
}

/// Validates an `offset` and `len` window into storage of `total` elements.
pub(crate) fn window(total: usize, offset: usize, len: usize) -> Result<Range<usize>> {
	match offset.checked_add(len) {
		Some(end) if end <= total => Ok(offset..end),
		_ => Err(Error::invalid_argument(Create, "window exceeds the storage length"))
	}
}
