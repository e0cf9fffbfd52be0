// SPDX-License-Identifier: Apache-2.0

mod capacity;
mod options;
mod write;

pub use capacity::*;
pub use options::*;

use std::cmp::min;
use std::{fmt, result};
use std::fmt::{Debug, Formatter};
use all_asserts::debug_assert_le;
use log::{debug, trace};
use crate::channel::Channel;
use crate::element::Element;
use crate::error::{Error, OperationKind::{Append, Create, WriteTo}, Result, ResultSetContext};
use crate::reader::Reader;
use crate::sink::Sink;
use crate::source::{Source, StreamSource};

pub type ByteBuilder = Builder<u8>;
pub type CharBuilder = Builder<char>;

fn allocate<T: Element>(capacity: usize) -> result::Result<Box<[T]>, CapacityError> {
	let mut data = Vec::new();
	data.try_reserve_exact(capacity)
		.map_err(|_| CapacityError::Allocation { required: capacity })?;
	data.resize(capacity, T::default());
	Ok(data.into_boxed_slice())
}

/// A growable, append-only element buffer.
///
/// Capacity grows to the larger of the needed size and double the current
/// capacity, clamped to the maximum capacity if one is set, then to the platform
/// allocation ceiling (see [`plan_capacity`]). A failed append leaves the builder
/// untouched, and memory the platform can't provide is reported as a
/// capacity-exceeded error rather than aborting.
///
/// Read-back functions like [`to_vec`](Self::to_vec) return copies; borrowed
/// views from [`as_slice`](Self::as_slice) can't outlive the next append.
#[derive(Clone)]
pub struct Builder<T: Element> {
	data: Box<[T]>,
	size: usize,
	max_capacity: Option<usize>,
}

impl<T: Element> Default for Builder<T> {
	fn default() -> Self { Self::new() }
}

impl<T: Element> Debug for Builder<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Builder")
			.field("data", &self.as_slice())
			.field("capacity", &self.capacity())
			.field("max_capacity", &self.max_capacity)
			.finish()
	}
}

impl<T: Element> PartialEq for Builder<T> {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl<T: Element> From<Vec<T>> for Builder<T> {
	fn from(value: Vec<T>) -> Self {
		let size = value.len();
		Self {
			data: value.into_boxed_slice(),
			size,
			max_capacity: None,
		}
	}
}

impl<T: Element> FromIterator<T> for Builder<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		iter.into_iter().collect::<Vec<_>>().into()
	}
}

impl<T: Element> AsRef<[T]> for Builder<T> {
	fn as_ref(&self) -> &[T] { self.as_slice() }
}

impl<T: Element> Builder<T> {
	/// Creates an unbounded builder with the default capacity.
	pub fn new() -> Self {
		Self {
			data: vec![T::default(); DEFAULT_CAPACITY].into_boxed_slice(),
			size: 0,
			max_capacity: None,
		}
	}

	/// Creates an unbounded builder with room for `capacity` elements.
	pub fn with_capacity(capacity: usize) -> Result<Self> {
		Self::with_options(BuilderOptions::new().with_initial_capacity(capacity))
	}

	/// Creates a fixed builder with room for `capacity` elements, growing to at most
	/// `max_capacity`.
	pub fn fixed(capacity: usize, max_capacity: usize) -> Result<Self> {
		Self::with_options(BuilderOptions::fixed(capacity, max_capacity))
	}

	/// Creates a builder from `options`, failing if they are inconsistent or the
	/// initial capacity can't be allocated.
	pub fn with_options(options: BuilderOptions) -> Result<Self> {
		options.validate(T::MAX_CAPACITY)?;
		Ok(Self {
			data: allocate(options.initial_capacity).map_err(|err| Error::capacity(Create, err))?,
			size: 0,
			max_capacity: options.max_capacity,
		})
	}

	/// Returns the number of elements.
	pub fn len(&self) -> usize { self.size }

	/// Returns `true` if the builder has no elements.
	pub fn is_empty(&self) -> bool { self.size == 0 }

	/// Returns the number of elements the builder can hold before growing.
	pub fn capacity(&self) -> usize { self.data.len() }

	/// Returns the maximum capacity, if the builder is fixed.
	pub fn max_capacity(&self) -> Option<usize> { self.max_capacity }

	/// Returns `true` if the builder has a maximum capacity.
	pub fn is_fixed(&self) -> bool { self.max_capacity.is_some() }

	/// Returns the elements as a slice.
	pub fn as_slice(&self) -> &[T] { &self.data[..self.size] }

	/// Copies the elements into a new vector.
	pub fn to_vec(&self) -> Vec<T> { self.as_slice().to_vec() }

	/// Ensures room for `additional` more elements, growing if needed.
	pub fn reserve(&mut self, additional: usize) -> Result {
		let Some(needed) = self.size.checked_add(additional) else {
			return Err(Error::capacity(Append, CapacityError::Overflow))
		};

		if needed <= self.capacity() {
			return Ok(())
		}

		plan_capacity(
			self.capacity(),
			needed,
			self.max_capacity,
			T::MAX_CAPACITY
		).and_then(|capacity| self.realloc(capacity))
		 .map_err(|err| {
			debug!("rejected growth of builder: {err}");
			Error::capacity(Append, err)
		})
	}

	fn realloc(&mut self, capacity: usize) -> result::Result<(), CapacityError> {
		trace!("resizing builder from {} to {capacity} elements", self.capacity());
		let mut data = allocate(capacity)?;
		data[..self.size].copy_from_slice(self.as_slice());
		self.data = data;
		Ok(())
	}

	/// Appends one element.
	pub fn push(&mut self, value: T) -> Result {
		self.reserve(1)?;
		self.data[self.size] = value;
		self.size += 1;
		Ok(())
	}

	/// Appends a slice of elements.
	pub fn append_slice(&mut self, values: &[T]) -> Result {
		if values.is_empty() {
			return Ok(())
		}

		self.reserve(values.len())?;
		let end = self.size + values.len();
		self.data[self.size..end].copy_from_slice(values);
		self.size = end;
		debug_assert_le!(self.size, self.capacity());
		Ok(())
	}

	/// Appends the contents of another builder.
	pub fn append_builder(&mut self, other: &Builder<T>) -> Result {
		self.append_slice(other.as_slice())
	}

	/// Appends elements from `reader` until its end, or until `limit` elements are
	/// appended. Returns the number appended.
	///
	/// A failed append leaves the builder untouched. When a fixed builder can't
	/// hold what a reader of known length has left, the append fails before
	/// anything is read. Readers of unknown length are read at most one element
	/// past the builder's room before the overflow is detected; elements read
	/// by a failed append are consumed.
	pub fn append_reader<S: Source<Elem = T>>(
		&mut self,
		reader: &mut Reader<S>,
		limit: Option<usize>
	) -> Result<usize> {
		let mut limit = limit.unwrap_or(usize::MAX);
		if let Some(max) = self.max_capacity {
			let room = max - self.size;
			match reader.remaining() {
				Some(remaining) if min(limit, remaining) > room =>
					return Err(Error::capacity(
						Append,
						CapacityError::Fixed {
							required: self.size.saturating_add(min(limit, remaining)),
							max
						}
					)),
				Some(_) => { }
				None => limit = min(limit, room.saturating_add(1))
			}
		}

		let start = self.size;
		match reader.read_to_limit(self, limit) {
			Ok(moved) => Ok(moved.unwrap_or(0)),
			Err(err) => {
				self.size = start;
				Err(err.with_operation(Append))
			}
		}
	}

	/// Appends elements from a streaming `channel` until its end, or until `limit`
	/// elements are appended. Returns the number appended. The channel isn't closed.
	pub fn append_channel<C: Channel<T>>(
		&mut self,
		channel: &mut C,
		limit: Option<usize>
	) -> Result<usize> {
		let mut reader = Reader::new(StreamSource::new(channel));
		self.append_reader(&mut reader, limit)
	}

	/// Clears the elements, keeping the allocated capacity.
	pub fn reset(&mut self) {
		self.size = 0;
	}

	/// Shrinks the capacity to the number of elements.
	pub fn trim_buffer(&mut self) {
		if self.capacity() > self.size {
			trace!("trimming builder from {} to {} elements", self.capacity(), self.size);
			self.data = self.as_slice().into();
		}
	}

	/// Writes all elements into `sink`. The builder is unchanged whether or not
	/// the write succeeds.
	pub fn write_to(&self, sink: &mut (impl Sink<T> + ?Sized)) -> Result {
		sink.write(self.as_slice()).set_context(WriteTo)
	}
}

#[cfg(feature = "bytes")]
impl Builder<u8> {
	/// Appends the remaining bytes of `buf`, advancing its cursor past them.
	/// Returns the number appended. Nothing is consumed if the append fails.
	pub fn append_buf(&mut self, buf: &mut impl bytes::Buf) -> Result<usize> {
		let count = buf.remaining();
		self.reserve(count)?;
		while buf.has_remaining() {
			let chunk = buf.chunk();
			let len = chunk.len();
			self.append_slice(chunk)?;
			buf.advance(len);
		}
		Ok(count)
	}

	/// Copies the bytes into a new [`Bytes`](bytes::Bytes).
	pub fn to_bytes(&self) -> bytes::Bytes {
		bytes::Bytes::copy_from_slice(self.as_slice())
	}
}
