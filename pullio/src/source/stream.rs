// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;
use log::{debug, trace};
use crate::channel::{Channel, Fill};
use crate::element::Element;
use crate::error::{Error, OperationKind::{Mark, Read, Reset, Close}, Result, ResultContext};
use crate::segment::Segment;
use super::Source;

pub const DEFAULT_CHUNK_SIZE: usize = 8192;
pub const DEFAULT_ZERO_READ_LIMIT: usize = 16;

/// Options for tuning [`StreamSource`]'s behavior.
///
/// # Chunk size
///
/// The number of elements the staging region grows by while a pull is filled,
/// and the size of each pull when data is moved to a sink in bulk. Defaults to
/// `8192`. A pull never allocates more than it has read plus one chunk, so large
/// requests against short channels stay cheap.
///
/// # Zero-read limit
///
/// The number of consecutive zero-length reads from the channel tolerated within
/// one pull. Once reached, the pull returns what it has without marking the end;
/// zero is never treated as exhaustion. Defaults to `16`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct StreamOptions {
	pub chunk_size: usize,
	pub zero_read_limit: usize,
}

impl Default for StreamOptions {
	fn default() -> Self { Self::new() }
}

impl StreamOptions {
	/// Creates a new set of stream options.
	pub const fn new() -> Self {
		Self {
			chunk_size: DEFAULT_CHUNK_SIZE,
			zero_read_limit: DEFAULT_ZERO_READ_LIMIT,
		}
	}

	/// Returns the chunk size.
	#[inline]
	pub const fn chunk_size(&self) -> usize { self.chunk_size }

	/// Returns the zero-read limit.
	#[inline]
	pub const fn zero_read_limit(&self) -> usize { self.zero_read_limit }

	/// Sets the chunk size. Values below one are raised to one.
	#[inline]
	pub const fn with_chunk_size(mut self, value: usize) -> Self {
		self.chunk_size = if value == 0 { 1 } else { value };
		self
	}

	/// Sets the zero-read limit. Values below one are raised to one.
	#[inline]
	pub const fn with_zero_read_limit(mut self, value: usize) -> Self {
		self.zero_read_limit = if value == 0 { 1 } else { value };
		self
	}
}

/// A streaming [`Source`] reading from a [`Channel`] into a private staging
/// region. The end is only known once the channel reports it, so a pull whose
/// data exactly fills the request may not be flagged as the end even if nothing
/// follows it.
///
/// Closing the source closes and drops the channel. Pass `&mut channel` to keep
/// ownership of it.
pub struct StreamSource<T: Element, C: Channel<T>> {
	channel: Option<C>,
	staging: Vec<T>,
	options: StreamOptions,
	is_eos: bool,
}

impl<T: Element, C: Channel<T>> StreamSource<T, C> {
	pub fn new(channel: C) -> Self {
		Self::with_options(channel, StreamOptions::default())
	}

	pub fn with_options(channel: C, options: StreamOptions) -> Self {
		Self {
			channel: Some(channel),
			staging: Vec::new(),
			options,
			is_eos: false,
		}
	}

	/// Returns the options used to create the source.
	pub fn options(&self) -> StreamOptions { self.options }

	/// Returns `true` if the channel has reported its end.
	pub fn is_eos(&self) -> bool { self.is_eos }

	/// Returns the channel, or `None` if the source was closed.
	pub fn into_inner(self) -> Option<C> { self.channel }

	/// Fills the staging region with at most `count` elements, returning the count
	/// read.
	fn fill(&mut self, count: usize) -> Result<usize> {
		let Self { channel, staging, options, is_eos } = self;
		staging.clear();

		let Some(channel) = channel else {
			*is_eos = true;
			return Ok(0)
		};

		let mut filled = 0;
		let mut zeros = 0;
		while filled < count && !*is_eos {
			if staging.len() == filled {
				let grow = min(count - filled, options.chunk_size);
				staging.resize(filled + grow, T::default());
			}

			match channel.read_some(&mut staging[filled..]).context(Read)? {
				Fill::Read(0) => {
					zeros += 1;
					if zeros >= options.zero_read_limit {
						debug!(
							"channel returned {zeros} empty reads in a row, ending \
							pull at {filled} of {count} elements"
						);
						break
					}
				}
				Fill::Read(n) => {
					zeros = 0;
					filled += min(n, staging.len() - filled);
				}
				Fill::End => {
					trace!("channel reported its end after {filled} elements");
					*is_eos = true;
				}
			}
		}

		staging.truncate(filled);
		Ok(filled)
	}
}

impl<T: Element, C: Channel<T>> Source for StreamSource<T, C> {
	type Elem = T;

	fn pull(&mut self, count: usize) -> Result<Segment<'_, T>> {
		if self.is_eos {
			return Ok(Segment::empty(true))
		}

		let filled = self.fill(count)?;
		Ok(Segment::staged(&mut self.staging[..filled], self.is_eos))
	}

	fn discard(&mut self, count: usize) -> Result<(usize, bool)> {
		let mut skipped = 0;
		while skipped < count && !self.is_eos {
			let n = self.fill(min(count - skipped, self.options.chunk_size))?;
			if n == 0 && !self.is_eos {
				break
			}
			skipped += n;
		}
		self.staging.clear();
		Ok((skipped, self.is_eos))
	}

	fn chunk_size(&self) -> usize { self.options.chunk_size }

	fn mark_supported(&self) -> bool {
		self.channel
			.as_ref()
			.map_or(false, |channel| channel.mark_supported())
	}

	fn mark(&mut self) -> Result {
		match self.channel.as_mut() {
			Some(channel) if channel.mark_supported() => channel.mark().context(Mark),
			_ => Err(Error::unsupported(Mark))
		}
	}

	fn reset(&mut self) -> Result {
		match self.channel.as_mut() {
			Some(channel) if channel.mark_supported() => {
				channel.reset().context(Reset)?;
				self.is_eos = false;
				Ok(())
			}
			_ => Err(Error::unsupported(Reset))
		}
	}

	/// Closes and drops the channel, releasing the staging region.
	fn close(&mut self) -> Result {
		self.staging = Vec::new();
		if let Some(mut channel) = self.channel.take() {
			channel.close().context(Close)?;
		}
		Ok(())
	}
}
