// SPDX-License-Identifier: Apache-2.0

use std::mem;
use crate::element::Element;

/// The storage behind a [`Segment`]'s data.
#[derive(Debug)]
pub enum View<'s, T: Element> {
	/// Read-only memory shared with the caller's storage.
	Borrowed(&'s [T]),
	/// Writable memory shared with the caller's storage. Writes are visible in
	/// the original storage.
	BorrowedMut(&'s mut [T]),
	/// A source's private staging region. Writes never reach the origin.
	Staged(&'s mut [T]),
	/// A private copy.
	Owned(Vec<T>),
}

impl<T: Element> View<'_, T> {
	fn data(&self) -> &[T] {
		match self {
			Self::Borrowed(data) => data,
			Self::BorrowedMut(data) |
			Self::Staged(data) => &**data,
			Self::Owned(data) => data.as_slice(),
		}
	}
}

/// The result of one read: a view of the elements obtained, and whether the end
/// of the source was reached.
///
/// # Sharing
///
/// Segments read from slices and byte buffers share memory with their origin
/// ([`is_shared`] returns `true`); segments read from streaming channels borrow a
/// private staging region instead. Use [`clone`], [`into_owned`], or the `take_*`
/// and `copy_*` functions to get a private copy.
///
/// # End flag
///
/// `is_end` returning `true` means no elements exist past this segment. For
/// streaming sources, `false` doesn't guarantee more data exists, only that the
/// end wasn't observed yet.
///
/// [`is_shared`]: Self::is_shared
/// [`clone`]: Clone::clone
/// [`into_owned`]: Self::into_owned
#[derive(Debug)]
pub struct Segment<'s, T: Element> {
	view: View<'s, T>,
	end: bool,
}

impl<'s, T: Element> Segment<'s, T> {
	pub(crate) fn new(view: View<'s, T>, end: bool) -> Self {
		Self { view, end }
	}

	/// Returns an empty segment.
	pub fn empty(end: bool) -> Self {
		Self::new(View::Borrowed(&[]), end)
	}

	pub(crate) fn borrowed(data: &'s [T], end: bool) -> Self {
		Self::new(View::Borrowed(data), end)
	}

	pub(crate) fn borrowed_mut(data: &'s mut [T], end: bool) -> Self {
		Self::new(View::BorrowedMut(data), end)
	}

	pub(crate) fn staged(data: &'s mut [T], end: bool) -> Self {
		Self::new(View::Staged(data), end)
	}

	/// Creates a segment owning `data`.
	pub fn owned(data: Vec<T>, end: bool) -> Self {
		Self::new(View::Owned(data), end)
	}

	/// Returns the data read.
	pub fn data(&self) -> &[T] { self.view.data() }

	/// Returns the data mutably, or `None` if the segment is a read-only view of
	/// shared memory.
	pub fn data_mut(&mut self) -> Option<&mut [T]> {
		match &mut self.view {
			View::Borrowed(_) => None,
			View::BorrowedMut(data) |
			View::Staged(data) => Some(&mut **data),
			View::Owned(data) => Some(data.as_mut_slice()),
		}
	}

	/// Returns the storage view.
	pub fn view(&self) -> &View<'s, T> { &self.view }

	/// Returns `true` if no elements exist past this segment.
	pub fn is_end(&self) -> bool { self.end }

	/// Returns `true` if the data shares memory with the caller's storage.
	pub fn is_shared(&self) -> bool {
		matches!(self.view, View::Borrowed(_) | View::BorrowedMut(_))
	}

	/// Returns the number of elements.
	pub fn len(&self) -> usize { self.data().len() }

	/// Returns `true` if the segment has no elements.
	pub fn is_empty(&self) -> bool { self.len() == 0 }

	/// Copies the data into a private vector, leaving the segment untouched.
	pub fn copy_vec(&self) -> Vec<T> { self.data().to_vec() }

	/// Takes the data as a private vector, leaving the segment empty. The end flag
	/// is kept.
	pub fn take_vec(&mut self) -> Vec<T> {
		match mem::replace(&mut self.view, View::Borrowed(&[])) {
			View::Owned(data) => data,
			view => view.data().to_vec()
		}
	}

	/// Converts into a segment owning its data, detached from the source.
	pub fn into_owned(self) -> Segment<'static, T> {
		let Self { view, end } = self;
		let data = match view {
			View::Owned(data) => data,
			view => view.data().to_vec()
		};
		Segment::owned(data, end)
	}
}

impl<T: Element> Clone for Segment<'_, T> {
	/// Deep-copies the segment into private storage, keeping the end flag.
	fn clone(&self) -> Self {
		Self::owned(self.copy_vec(), self.end)
	}
}

impl<T: Element> AsRef<[T]> for Segment<'_, T> {
	fn as_ref(&self) -> &[T] { self.data() }
}

impl<T: Element> PartialEq for Segment<'_, T> {
	fn eq(&self, other: &Self) -> bool {
		self.end == other.end && self.data() == other.data()
	}
}

impl Segment<'_, char> {
	/// Copies the characters into a string, leaving the segment untouched.
	pub fn copy_string(&self) -> String {
		self.data().iter().collect()
	}

	/// Takes the characters as a string, leaving the segment empty.
	pub fn take_string(&mut self) -> String {
		self.take_vec().into_iter().collect()
	}
}

#[cfg(feature = "bytes")]
impl Segment<'_, u8> {
	/// Copies the bytes into a new [`Bytes`](bytes::Bytes), leaving the segment
	/// untouched.
	pub fn copy_bytes(&self) -> bytes::Bytes {
		bytes::Bytes::copy_from_slice(self.data())
	}

	/// Takes the bytes as a [`Bytes`](bytes::Bytes), leaving the segment empty.
	pub fn take_bytes(&mut self) -> bytes::Bytes {
		self.take_vec().into()
	}
}
