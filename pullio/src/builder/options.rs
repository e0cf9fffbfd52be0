// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, OperationKind::Create, Result};

pub const DEFAULT_CAPACITY: usize = 32;

/// Options for creating a [`Builder`](super::Builder).
///
/// # Initial capacity
///
/// The number of elements allocated up front. Defaults to `32`.
///
/// # Maximum capacity
///
/// An upper bound on growth. A builder with a maximum is *fixed*: appends past
/// the maximum fail with an invalid-state error instead of growing. Unset by
/// default, leaving growth bounded only by the platform's allocation ceiling.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct BuilderOptions {
	pub initial_capacity: usize,
	pub max_capacity: Option<usize>,
}

impl Default for BuilderOptions {
	fn default() -> Self { Self::new() }
}

impl BuilderOptions {
	/// Creates a new set of builder options.
	pub const fn new() -> Self {
		Self {
			initial_capacity: DEFAULT_CAPACITY,
			max_capacity: None,
		}
	}

	/// Presets the options for a fixed builder, starting at `capacity` and never
	/// growing past `max_capacity`.
	#[inline]
	pub const fn fixed(capacity: usize, max_capacity: usize) -> Self {
		Self {
			initial_capacity: capacity,
			max_capacity: Some(max_capacity),
		}
	}

	/// Returns the initial capacity.
	#[inline]
	pub const fn initial_capacity(&self) -> usize { self.initial_capacity }

	/// Returns the maximum capacity.
	#[inline]
	pub const fn max_capacity(&self) -> Option<usize> { self.max_capacity }

	/// Returns `true` if the options describe a fixed builder.
	#[inline]
	pub const fn is_fixed(&self) -> bool { self.max_capacity.is_some() }

	/// Sets the initial capacity.
	#[inline]
	pub fn set_initial_capacity(&mut self, value: usize) {
		self.initial_capacity = value;
	}

	/// Sets the maximum capacity.
	#[inline]
	pub fn set_max_capacity(&mut self, value: Option<usize>) {
		self.max_capacity = value;
	}

	/// Sets the initial capacity.
	#[inline]
	pub const fn with_initial_capacity(mut self, value: usize) -> Self {
		self.initial_capacity = value;
		self
	}

	/// Sets the maximum capacity.
	#[inline]
	pub const fn with_max_capacity(mut self, value: usize) -> Self {
		self.max_capacity = Some(value);
		self
	}

	/// Checks the options for an element type that fits at most `ceiling` elements
	/// in one allocation.
	pub(crate) fn validate(&self, ceiling: usize) -> Result {
		if self.initial_capacity > ceiling {
			return Err(Error::invalid_argument(
				Create,
				"initial capacity exceeds the allocation ceiling"
			))
		}

		match self.max_capacity {
			Some(max) if max < self.initial_capacity => Err(Error::invalid_argument(
				Create,
				"maximum capacity is less than the initial capacity"
			)),
			Some(max) if max > ceiling => Err(Error::invalid_argument(
				Create,
				"maximum capacity exceeds the allocation ceiling"
			)),
			_ => Ok(())
		}
	}
}
