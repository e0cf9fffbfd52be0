// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{fmt, io, result};
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use amplify_derive::Display;
use crate::builder::CapacityError;

pub type ErrorBox = Box<dyn StdError + Send + Sync>;
pub type Result<T = ()> = result::Result<T, Error>;

/// The operation an [`Error`] was raised from.
#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq)]
pub enum OperationKind {
	#[default]
	#[display("unknown operation")]
	Unknown,
	#[display("create")]
	Create,
	#[display("read")]
	Read,
	#[display("skip")]
	Skip,
	#[display("read to sink")]
	ReadTo,
	#[display("mark")]
	Mark,
	#[display("reset")]
	Reset,
	#[display("close")]
	Close,
	#[display("append")]
	Append,
	#[display("write to sink")]
	WriteTo,
}

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum ErrorKind {
	/// A bad call: inconsistent windows or capacities. Raised before any state
	/// is touched.
	#[display("invalid argument: {0}")]
	InvalidArgument(&'static str),
	/// A failure in the underlying channel or sink.
	#[display("IO error")]
	Io,
	/// The instance can no longer satisfy its contract.
	#[display("invalid state: {0}")]
	InvalidState(&'static str),
	/// The platform allocation ceiling was exceeded, or the memory couldn't be
	/// allocated.
	#[display("capacity exceeded")]
	CapacityExceeded,
	/// The operation is not supported by this source.
	#[display("unsupported operation")]
	Unsupported,
}

#[derive(Debug)]
pub struct Error {
	op: OperationKind,
	kind: ErrorKind,
	source: Option<ErrorBox>,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { op, kind, source } = self;
		if let Some(source) = source {
			write!(f, "{op} failed; {kind} ({source})")
		} else {
			write!(f, "{op} failed; {kind}")
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		if let Some(ref source) = self.source {
			Some(source.as_ref())
		} else {
			None
		}
	}
}

impl Error {
	pub(crate) fn new(
		op: OperationKind,
		kind: ErrorKind,
		source: Option<ErrorBox>
	) -> Self {
		Self { op, kind, source }
	}

	/// Creates a new "invalid argument" error.
	pub fn invalid_argument(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, ErrorKind::InvalidArgument(message), None)
	}

	/// Creates a new IO error.
	pub fn io(op: OperationKind, error: io::Error) -> Self {
		Self::new(op, ErrorKind::Io, Some(error.into()))
	}

	/// Creates a new "invalid state" error.
	pub fn invalid_state(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, ErrorKind::InvalidState(message), None)
	}

	/// Creates a new "unsupported" error.
	pub fn unsupported(op: OperationKind) -> Self {
		Self::new(op, ErrorKind::Unsupported, None)
	}

	/// Creates a capacity error from the capacity planner.
	pub(crate) fn capacity(op: OperationKind, error: CapacityError) -> Self {
		let kind = match error {
			CapacityError::Fixed { .. } =>
				ErrorKind::InvalidState("fixed-capacity builder is full"),
			CapacityError::Ceiling { .. } |
			CapacityError::Overflow |
			CapacityError::Allocation { .. } => ErrorKind::CapacityExceeded,
		};
		Self::new(op, kind, Some(error.into()))
	}

	/// Returns the operation kind.
	pub fn operation(&self) -> OperationKind { self.op }

	/// Sets the operation kind.
	pub fn with_operation(mut self, op: OperationKind) -> Self {
		self.op = op;
		self
	}

	/// Returns the error kind.
	pub fn kind(&self) -> ErrorKind { self.kind }

	/// Returns the source downcast into an IO Error, if possible.
	pub fn io_source(&self) -> Option<&io::Error> {
		self.source.as_ref()?.downcast_ref()
	}

	pub fn is_invalid_argument(&self) -> bool {
		matches!(self.kind, ErrorKind::InvalidArgument(_))
	}

	pub fn is_io(&self) -> bool { matches!(self.kind, ErrorKind::Io) }

	pub fn is_invalid_state(&self) -> bool {
		matches!(self.kind, ErrorKind::InvalidState(_))
	}

	pub fn is_capacity_exceeded(&self) -> bool {
		matches!(self.kind, ErrorKind::CapacityExceeded)
	}

	pub fn is_unsupported(&self) -> bool {
		matches!(self.kind, ErrorKind::Unsupported)
	}
}

impl From<io::Error> for Error {
	fn from(value: io::Error) -> Self {
		Self::io(OperationKind::Unknown, value)
	}
}

impl From<Error> for io::Error {
	fn from(mut value: Error) -> Self {
		if value.is_io() {
			if let Some(source) = value.source.take() {
				return match source.downcast::<io::Error>() {
					Ok(error) => *error,
					Err(source) => io::Error::new(io::ErrorKind::Other, source)
				}
			}
		}

		let kind = match value.kind {
			ErrorKind::InvalidArgument(_) => io::ErrorKind::InvalidInput,
			ErrorKind::Unsupported        => io::ErrorKind::Unsupported,
			_                             => io::ErrorKind::Other,
		};
		io::Error::new(kind, value)
	}
}

/// Attaches an operation to IO results.
pub trait ResultContext<T> {
	fn context(self, op: OperationKind) -> Result<T>;
}

impl<T> ResultContext<T> for result::Result<T, io::Error> {
	#[inline]
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|err| Error::io(op, err))
	}
}

/// Replaces the operation of crate results.
pub trait ResultSetContext<T> {
	fn set_context(self, op: OperationKind) -> Result<T>;
}

impl<T> ResultSetContext<T> for Result<T> {
	#[inline]
	fn set_context(self, op: OperationKind) -> Result<T> {
		self.map_err(|err| err.with_operation(op))
	}
}
