// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::io::{Read, Seek, SeekFrom};
use crate::element::Element;

/// The outcome of one [`Channel::read_some`] call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Fill {
	/// Some number of elements were read, possibly zero. Zero is not the end.
	Read(usize),
	/// The channel is exhausted.
	End,
}

/// A streaming channel of unknown length, read some elements at a time.
pub trait Channel<T: Element> {
	/// Reads at most `buf.len()` elements into `buf`.
	fn read_some(&mut self, buf: &mut [T]) -> io::Result<Fill>;

	/// Returns `true` if the channel can replay from a mark.
	fn mark_supported(&self) -> bool { false }

	/// Marks the current position for a later [`reset`](Self::reset).
	fn mark(&mut self) -> io::Result<()> {
		Err(io::Error::new(io::ErrorKind::Unsupported, "mark is not supported"))
	}

	/// Rewinds to the last mark.
	fn reset(&mut self) -> io::Result<()> {
		Err(io::Error::new(io::ErrorKind::Unsupported, "reset is not supported"))
	}

	/// Closes the channel. Closing is idempotent.
	fn close(&mut self) -> io::Result<()> { Ok(()) }
}

impl<T: Element, C: Channel<T> + ?Sized> Channel<T> for &mut C {
	fn read_some(&mut self, buf: &mut [T]) -> io::Result<Fill> {
		(**self).read_some(buf)
	}

	fn mark_supported(&self) -> bool { (**self).mark_supported() }

	fn mark(&mut self) -> io::Result<()> { (**self).mark() }

	fn reset(&mut self) -> io::Result<()> { (**self).reset() }

	fn close(&mut self) -> io::Result<()> { (**self).close() }
}

impl<T: Element, C: Channel<T> + ?Sized> Channel<T> for Box<C> {
	fn read_some(&mut self, buf: &mut [T]) -> io::Result<Fill> {
		(**self).read_some(buf)
	}

	fn mark_supported(&self) -> bool { (**self).mark_supported() }

	fn mark(&mut self) -> io::Result<()> { (**self).mark() }

	fn reset(&mut self) -> io::Result<()> { (**self).reset() }

	fn close(&mut self) -> io::Result<()> { (**self).close() }
}

fn read_bytes(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<Fill> {
	if buf.is_empty() {
		return Ok(Fill::Read(0))
	}

	loop {
		match reader.read(buf) {
			Ok(0) => break Ok(Fill::End),
			Ok(n) => break Ok(Fill::Read(n)),
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => break Err(err)
		}
	}
}

/// A byte [`Channel`] reading from a wrapped [`Read`]er. A zero-length read into
/// a non-empty buffer is the end of the channel.
pub struct ReadChannel<R: Read> {
	reader: R,
}

impl<R: Read> ReadChannel<R> {
	pub fn new(reader: R) -> Self { Self { reader } }

	pub fn get_ref(&self) -> &R { &self.reader }

	pub fn into_inner(self) -> R { self.reader }
}

impl<R: Read> From<R> for ReadChannel<R> {
	fn from(reader: R) -> Self { Self::new(reader) }
}

impl<R: Read> Channel<u8> for ReadChannel<R> {
	fn read_some(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
		read_bytes(&mut self.reader, buf)
	}
}

/// A byte [`Channel`] reading from a seekable reader, replaying from a mark by
/// seeking back to it.
pub struct SeekChannel<R: Read + Seek> {
	reader: R,
	mark: Option<u64>,
}

impl<R: Read + Seek> SeekChannel<R> {
	pub fn new(reader: R) -> Self {
		Self { reader, mark: None }
	}

	pub fn get_ref(&self) -> &R { &self.reader }

	pub fn into_inner(self) -> R { self.reader }
}

impl<R: Read + Seek> From<R> for SeekChannel<R> {
	fn from(reader: R) -> Self { Self::new(reader) }
}

impl<R: Read + Seek> Channel<u8> for SeekChannel<R> {
	fn read_some(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
		read_bytes(&mut self.reader, buf)
	}

	fn mark_supported(&self) -> bool { true }

	fn mark(&mut self) -> io::Result<()> {
		self.mark = Some(self.reader.stream_position()?);
		Ok(())
	}

	fn reset(&mut self) -> io::Result<()> {
		let Some(mark) = self.mark else {
			return Err(io::Error::new(io::ErrorKind::InvalidInput, "no mark is set"))
		};
		self.reader.seek(SeekFrom::Start(mark))?;
		Ok(())
	}
}

/// A [`Channel`] pulling elements from an iterator. A read that exhausts the
/// iterator part way reports what it got; the end is reported on the next read.
pub struct IterChannel<I: Iterator> {
	iter: I,
	done: bool,
}

impl<I: Iterator> IterChannel<I> {
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self { iter: iter.into_iter(), done: false }
	}
}

impl<T: Element, I: Iterator<Item = T>> Channel<T> for IterChannel<I> {
	fn read_some(&mut self, buf: &mut [T]) -> io::Result<Fill> {
		if self.done {
			return Ok(Fill::End)
		}

		let mut count = 0;
		for slot in buf.iter_mut() {
			let Some(value) = self.iter.next() else {
				self.done = true;
				break
			};
			*slot = value;
			count += 1;
		}

		if count == 0 && self.done {
			Ok(Fill::End)
		} else {
			Ok(Fill::Read(count))
		}
	}
}
