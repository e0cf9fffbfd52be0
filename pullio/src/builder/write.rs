// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io};
use std::fmt::{Display, Formatter, Write as _};
use crate::element::Element;
use crate::error::Result;
use crate::sink::Sink;
use super::Builder;

impl<T: Element> Sink<T> for Builder<T> {
	/// Appends `data`. A fixed builder fails rather than filling part way, so it
	/// reports no remaining room limit.
	fn write(&mut self, data: &[T]) -> Result {
		self.append_slice(data)
	}
}

impl io::Write for Builder<u8> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.append_slice(buf)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl fmt::Write for Builder<char> {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.reserve(s.chars().count()).map_err(|_| fmt::Error)?;
		for c in s.chars() {
			self.push(c).map_err(|_| fmt::Error)?;
		}
		Ok(())
	}

	fn write_char(&mut self, c: char) -> fmt::Result {
		self.push(c).map_err(|_| fmt::Error)
	}
}

impl Display for Builder<char> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		self.as_slice()
			.iter()
			.try_for_each(|&c| f.write_char(c))
	}
}
