// SPDX-License-Identifier: Apache-2.0

use crate::element::Element;
use crate::error::Result;
use crate::segment::Segment;
use super::{Cursor, Source, window};

/// A bounded [`Source`] over a read-only slice. Segments borrow the slice
/// directly.
#[derive(Clone, Debug)]
pub struct SliceSource<'a, T: Element> {
	data: &'a [T],
	cursor: Cursor,
}

impl<'a, T: Element> SliceSource<'a, T> {
	pub fn new(data: &'a [T]) -> Self {
		Self { data, cursor: Cursor::new(data.len()) }
	}

	/// Creates a source over `len` elements of `data` from `offset`. Nothing
	/// outside the window is reachable.
	pub fn window(data: &'a [T], offset: usize, len: usize) -> Result<Self> {
		Ok(Self::new(&data[window(data.len(), offset, len)?]))
	}
}

impl<T: Element> Source for SliceSource<'_, T> {
	type Elem = T;

	fn pull(&mut self, count: usize) -> Result<Segment<'_, T>> {
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

/// A bounded [`Source`] over a mutable slice. Segments borrow the slice mutably,
/// so writes through [`Segment::data_mut`] land in the original storage.
#[derive(Debug)]
pub struct SliceMutSource<'a, T: Element> {
	data: &'a mut [T],
	cursor: Cursor,
}

impl<'a, T: Element> SliceMutSource<'a, T> {
	pub fn new(data: &'a mut [T]) -> Self {
		let cursor = Cursor::new(data.len());
		Self { data, cursor }
	}

	/// Creates a source over `len` elements of `data` from `offset`. Nothing
	/// outside the window is reachable.
	pub fn window(data: &'a mut [T], offset: usize, len: usize) -> Result<Self> {
		let range = window(data.len(), offset, len)?;
		Ok(Self::new(&mut data[range]))
	}
}

impl<T: Element> Source for SliceMutSource<'_, T> {
	type Elem = T;

	fn pull(&mut self, count: usize) -> Result<Segment<'_, T>> {
		let range = self.cursor.advance(count);
		Ok(Segment::borrowed_mut(&mut self.data[range], self.cursor.is_end()))
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
