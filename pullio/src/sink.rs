// SPDX-License-Identifier: Apache-2.0

//! Destinations for [`Reader::read_to`](crate::Reader::read_to) and
//! [`Builder::write_to`](crate::Builder::write_to).

use std::{fmt, io};
use std::io::Write;
use crate::element::Element;
use crate::error::{Error, OperationKind::WriteTo, Result, ResultContext};

/// A data sink.
pub trait Sink<T: Element> {
	/// Returns the number of elements the sink can still accept, or `None` if it
	/// is unbounded.
	fn remaining(&self) -> Option<usize> { None }

	/// Writes all of `data` into the sink, or fails without writing anything if
	/// it doesn't fit.
	fn write(&mut self, data: &[T]) -> Result;

	/// Writes all buffered data to its final target.
	fn flush(&mut self) -> Result { Ok(()) }
}

impl<T: Element, S: Sink<T> + ?Sized> Sink<T> for &mut S {
	fn remaining(&self) -> Option<usize> { (**self).remaining() }

	fn write(&mut self, data: &[T]) -> Result { (**self).write(data) }

	fn flush(&mut self) -> Result { (**self).flush() }
}

fn check_room(remaining: usize, len: usize) -> Result {
	if len > remaining {
		Err(Error::invalid_argument(WriteTo, "data exceeds the sink's remaining space"))
	} else {
		Ok(())
	}
}

/// A [`Sink`] filling a fixed slice from the front.
#[derive(Debug)]
pub struct SliceSink<'a, T: Element> {
	data: &'a mut [T],
	pos: usize,
}

impl<'a, T: Element> SliceSink<'a, T> {
	pub fn new(data: &'a mut [T]) -> Self {
		Self { data, pos: 0 }
	}

	/// Returns the number of elements written.
	pub fn position(&self) -> usize { self.pos }

	/// Returns the written part of the slice.
	pub fn filled(&self) -> &[T] { &self.data[..self.pos] }

	pub fn into_inner(self) -> &'a mut [T] { self.data }
}

impl<T: Element> Sink<T> for SliceSink<'_, T> {
	fn remaining(&self) -> Option<usize> {
		Some(self.data.len() - self.pos)
	}

	fn write(&mut self, data: &[T]) -> Result {
		check_room(self.data.len() - self.pos, data.len())?;
		let end = self.pos + data.len();
		self.data[self.pos..end].copy_from_slice(data);
		self.pos = end;
		Ok(())
	}
}

impl<T: Element> Sink<T> for Vec<T> {
	fn write(&mut self, data: &[T]) -> Result {
		self.extend_from_slice(data);
		Ok(())
	}
}

impl Sink<char> for String {
	fn write(&mut self, data: &[char]) -> Result {
		self.extend(data);
		Ok(())
	}
}

/// A byte [`Sink`] writing into a [`BufMut`](bytes::BufMut), advancing its
/// cursor.
#[cfg(feature = "bytes")]
#[derive(Debug)]
pub struct BufSink<B: bytes::BufMut> {
	buf: B,
}

#[cfg(feature = "bytes")]
impl<B: bytes::BufMut> BufSink<B> {
	pub fn new(buf: B) -> Self { Self { buf } }

	pub fn get_ref(&self) -> &B { &self.buf }

	pub fn into_inner(self) -> B { self.buf }
}

#[cfg(feature = "bytes")]
impl<B: bytes::BufMut> Sink<u8> for BufSink<B> {
	fn remaining(&self) -> Option<usize> {
		Some(self.buf.remaining_mut())
	}

	fn write(&mut self, data: &[u8]) -> Result {
		check_room(self.buf.remaining_mut(), data.len())?;
		self.buf.put_slice(data);
		Ok(())
	}
}

/// A byte [`Sink`] writing to a wrapped [`Write`]r.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
	writer: W,
}

impl<W: Write> WriterSink<W> {
	pub fn new(writer: W) -> Self { Self { writer } }

	pub fn get_ref(&self) -> &W { &self.writer }

	pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write> From<W> for WriterSink<W> {
	fn from(writer: W) -> Self { Self::new(writer) }
}

impl<W: Write> Sink<u8> for WriterSink<W> {
	fn write(&mut self, data: &[u8]) -> Result {
		self.writer.write_all(data).context(WriteTo)
	}

	fn flush(&mut self) -> Result {
		self.writer.flush().context(WriteTo)
	}
}

/// A character [`Sink`] appending to a wrapped [`fmt::Write`]r.
#[derive(Debug)]
pub struct FmtSink<W: fmt::Write> {
	writer: W,
}

impl<W: fmt::Write> FmtSink<W> {
	pub fn new(writer: W) -> Self { Self { writer } }

	pub fn get_ref(&self) -> &W { &self.writer }

	pub fn into_inner(self) -> W { self.writer }
}

impl<W: fmt::Write> Sink<char> for FmtSink<W> {
	fn write(&mut self, data: &[char]) -> Result {
		for &value in data {
			self.writer
				.write_char(value)
				.map_err(|err| io::Error::new(io::ErrorKind::Other, err))
				.context(WriteTo)?;
		}
		Ok(())
	}
}

/// Returns a [`Sink`] that writes to nowhere, dropping any data written to it.
pub fn void_sink() -> VoidSink { VoidSink }

/// A [`Sink`] that writes to nowhere, dropping any data written to it.
#[derive(Copy, Clone, Debug, Default)]
pub struct VoidSink;

impl<T: Element> Sink<T> for VoidSink {
	/// Drops `data`.
	fn write(&mut self, _data: &[T]) -> Result { Ok(()) }
}
