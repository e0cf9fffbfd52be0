// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;
use std::io;
use std::io::Read;
use log::trace;
use crate::channel::{Channel, ReadChannel};
use crate::element::Element;
use crate::error::{Error, OperationKind, OperationKind::{Close, Mark, ReadTo, Reset, Skip}, Result, ResultSetContext};
use crate::segment::Segment;
use crate::sink::{Sink, SliceSink};
use crate::source::{SliceMutSource, SliceSource, Source, StreamOptions, StreamSource};

/// A stateful cursor over a [`Source`].
///
/// # End of data
///
/// Every size-bearing read reports whether the end of the source was reached.
/// Once the end is confirmed, every later [`read`], [`skip`], or [`read_to`]
/// returns the empty, zero, or `None` result without touching the source again.
/// For bounded sources the end is reported with the last data; for streaming
/// sources it may be reported one read later, with an empty segment.
///
/// Zero-length requests never report the end and never touch the source.
///
/// # Closing
///
/// A closed reader behaves as if its source were exhausted. Closing twice has no
/// effect.
///
/// [`read`]: Self::read
/// [`skip`]: Self::skip
/// [`read_to`]: Self::read_to
pub struct Reader<S: Source> {
	source: S,
	position: usize,
	mark: Option<usize>,
	is_exhausted: bool,
	is_closed: bool,
}

impl<S: Source> Reader<S> {
	pub fn new(source: S) -> Self {
		Self {
			source,
			position: 0,
			mark: None,
			is_exhausted: false,
			is_closed: false,
		}
	}

	/// Returns the number of elements consumed since creation or the last reset.
	pub fn position(&self) -> usize { self.position }

	/// Returns `true` if the end of the source was confirmed.
	pub fn is_exhausted(&self) -> bool { self.is_exhausted }

	/// Returns `true` if the reader was closed.
	pub fn is_closed(&self) -> bool { self.is_closed }

	/// Returns the number of elements left, if the source knows it. A closed
	/// reader has none left.
	pub fn remaining(&self) -> Option<usize> {
		if self.is_closed {
			Some(0)
		} else {
			self.source.remaining()
		}
	}

	/// Returns a reference to the source.
	pub fn source(&self) -> &S { &self.source }

	/// Consumes the reader, returning its source.
	pub fn into_inner(self) -> S { self.source }

	/// Reads at most `count` elements.
	pub fn read(&mut self, count: usize) -> Result<Segment<'_, S::Elem>> {
		if count == 0 {
			return Ok(Segment::empty(false))
		}

		if self.is_done() {
			return Ok(Segment::empty(true))
		}

		let segment = self.source.pull(count).set_context(OperationKind::Read)?;
		self.position += segment.len();
		self.is_exhausted = segment.is_end();
		Ok(segment)
	}

	/// Discards at most `count` elements, returning the number discarded.
	pub fn skip(&mut self, count: usize) -> Result<usize> {
		if count == 0 || self.is_done() {
			return Ok(0)
		}

		let (skipped, end) = self.source.discard(count).set_context(Skip)?;
		self.position += skipped;
		self.is_exhausted = end;
		Ok(skipped)
	}

	/// Moves all remaining elements into `sink`, as many as it can accept. Returns
	/// the number moved, or `None` if the source was already exhausted and nothing
	/// was moved.
	pub fn read_to(&mut self, sink: &mut (impl Sink<S::Elem> + ?Sized)) -> Result<Option<usize>> {
		self.read_to_limit(sink, usize::MAX)
	}

	/// Moves at most `limit` elements into `sink`, returning the number moved, or
	/// `None` if the source was already exhausted and nothing was moved. A zero
	/// limit, or a sink with no room left, returns `Some(0)` without touching the
	/// source.
	pub fn read_to_limit(
		&mut self,
		sink: &mut (impl Sink<S::Elem> + ?Sized),
		limit: usize
	) -> Result<Option<usize>> {
		let limit = sink.remaining().map_or(limit, |room| min(room, limit));
		if limit == 0 {
			return Ok(Some(0))
		}

		if self.is_done() {
			return Ok(None)
		}

		let chunk_size = self.source.chunk_size();
		let mut moved = 0;
		while moved < limit {
			let segment = self.source.pull(min(limit - moved, chunk_size)).set_context(ReadTo)?;
			let (count, end) = (segment.len(), segment.is_end());
			self.position += count;
			self.is_exhausted = end;
			sink.write(segment.data()).set_context(ReadTo)?;
			moved += count;

			if end {
				return Ok(if moved == 0 { None } else { Some(moved) })
			}

			if count == 0 {
				break
			}
		}
		Ok(Some(moved))
	}

	/// Returns `true` if the reader can rewind to a mark.
	pub fn mark_supported(&self) -> bool {
		!self.is_closed && self.source.mark_supported()
	}

	/// Marks the current position for a later [`reset`](Self::reset).
	pub fn mark(&mut self) -> Result {
		self.check_open(Mark)?;
		if !self.source.mark_supported() {
			return Err(Error::unsupported(Mark))
		}

		self.source.mark()?;
		self.mark = Some(self.position);
		Ok(())
	}

	/// Rewinds to the last mark. Bounded sources with no mark rewind to their
	/// start.
	pub fn reset(&mut self) -> Result {
		self.check_open(Reset)?;
		if !self.source.mark_supported() {
			return Err(Error::unsupported(Reset))
		}

		self.source.reset()?;
		self.position = self.mark.unwrap_or(0);
		self.is_exhausted = false;
		Ok(())
	}

	/// Closes the reader and its source. Closing is idempotent.
	pub fn close(&mut self) -> Result {
		if self.is_closed {
			return Ok(())
		}

		self.is_closed = true;
		trace!("closing reader at position {}", self.position);
		self.source.close().set_context(Close)
	}

	fn is_done(&self) -> bool {
		self.is_closed || self.is_exhausted
	}

	fn check_open(&self, op: OperationKind) -> Result {
		if self.is_closed {
			Err(Error::invalid_state(op, "reader is closed"))
		} else {
			Ok(())
		}
	}
}

impl<'a, T: Element> Reader<SliceSource<'a, T>> {
	/// Creates a reader over a slice. Segments share the slice's memory.
	pub fn from_slice(data: &'a [T]) -> Self {
		Self::new(SliceSource::new(data))
	}

	/// Creates a reader over `len` elements of `data` from `offset`.
	pub fn from_window(data: &'a [T], offset: usize, len: usize) -> Result<Self> {
		Ok(Self::new(SliceSource::window(data, offset, len)?))
	}
}

impl<'a, T: Element> Reader<SliceMutSource<'a, T>> {
	/// Creates a reader over a mutable slice. Writes to segments land in the slice.
	pub fn from_slice_mut(data: &'a mut [T]) -> Self {
		Self::new(SliceMutSource::new(data))
	}

	/// Creates a reader over `len` elements of `data` from `offset`.
	pub fn from_window_mut(data: &'a mut [T], offset: usize, len: usize) -> Result<Self> {
		Ok(Self::new(SliceMutSource::window(data, offset, len)?))
	}
}

#[cfg(feature = "bytes")]
impl Reader<crate::source::BytesSource> {
	/// Creates a reader over a byte buffer. Segments share the buffer's memory.
	pub fn from_bytes(data: bytes::Bytes) -> Self {
		Self::new(data.into())
	}
}

impl<T: Element, C: Channel<T>> Reader<StreamSource<T, C>> {
	/// Creates a reader over a streaming channel.
	pub fn from_channel(channel: C) -> Self {
		Self::new(StreamSource::new(channel))
	}

	/// Creates a reader over a streaming channel with custom options.
	pub fn from_channel_with(channel: C, options: StreamOptions) -> Self {
		Self::new(StreamSource::with_options(channel, options))
	}
}

impl<R: Read> Reader<StreamSource<u8, ReadChannel<R>>> {
	/// Creates a reader over a [`Read`]er.
	pub fn from_read(reader: R) -> Self {
		Self::from_channel(ReadChannel::new(reader))
	}
}

/// Reads into `buf` as [`read_to`](Reader::read_to) does. `Ok(0)` is only
/// returned at the end of the source or for an empty `buf`; a streaming pull
/// that gave up on a channel returning nothing fails with
/// [`WouldBlock`](io::ErrorKind::WouldBlock), leaving the reader usable.
impl<S: Source<Elem = u8>> Read for Reader<S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if buf.is_empty() {
			return Ok(0)
		}

		let mut sink = SliceSink::new(buf);
		match self.read_to(&mut sink)? {
			None => Ok(0),
			Some(0) => Err(io::Error::new(
				io::ErrorKind::WouldBlock,
				"channel returned no data without ending"
			)),
			Some(n) => Ok(n)
		}
	}
}
