// SPDX-License-Identifier: Apache-2.0

use ::bytes::Bytes;
use crate::error::Result;
use crate::segment::Segment;
use super::{Cursor, Source, window};

/// A bounded byte [`Source`] over a read-only [`Bytes`] buffer. Segments borrow
/// the buffer's memory, which is shared with every other handle to it.
#[derive(Clone, Debug)]
pub struct BytesSource {
	data: Bytes,
	cursor: Cursor,
}

impl BytesSource {
	/// Creates a source sharing `data`'s memory.
	pub fn new(data: Bytes) -> Self {
		let cursor = Cursor::new(data.len());
		Self { data, cursor }
	}

	/// Creates a source over `len` bytes of `data` from `offset`, sharing only that
	/// window.
	pub fn window(data: &Bytes, offset: usize, len: usize) -> Result<Self> {
		Ok(Self::new(data.slice(window(data.len(), offset, len)?)))
	}

	/// Creates a source owning a copy of `data`.
	pub fn copy_from_slice(data: &[u8]) -> Self {
		Self::new(Bytes::copy_from_slice(data))
	}

	/// Returns the unread bytes, sharing memory with the source.
	pub fn unread(&self) -> Bytes {
		let Self { data, cursor } = self;
		data.slice(data.len() - cursor.remaining()..)
	}
}

impl From<Bytes> for BytesSource {
	fn from(data: Bytes) -> Self { Self::new(data) }
}

impl From<Vec<u8>> for BytesSource {
	fn from(data: Vec<u8>) -> Self { Self::new(data.into()) }
}

impl Source for BytesSource {
	type Elem = u8;

	fn pull(&mut self, count: usize) -> Result<Segment<'_, u8>> {
		let range = self.cursor.advance(count);
		Ok(Segment::borrowed(&self.data[range], self.cursor.is_end()))
	}

	fn discard(&mut self, count: usize) -> Result<(usize, bool)> {
		let range = self.cursor.advance(count);
		Ok((range.len(), self.cursor.is_end()))
	}

	fn remaining(&self) -> Option<usize> { Some(self.cursor.remaining()) }

	fn mark_supported(&self) -> bool { true }

	fn mark(&mut self) -> Result {
		self.cursor.mark();
		Ok(())
	}

	fn reset(&mut self) -> Result {
		self.cursor.reset();
		Ok(())
	}
}
