// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt::{Arguments, Debug};
use std::io;
use std::rc::Rc;
use pullio::{Channel, Element, Fill};

macro_rules! qc_assert_eq {
	($left:expr,$right:expr) => {{
		let left = $left;
		let right = $right;
		if left == right {
			::quickcheck::TestResult::passed()
		} else {
			::quickcheck::TestResult::error(
				$crate::common::format_qc_assert_error(&left, &right, None)
			)
		}
	}};
	($left:expr,$right:expr,$($arg:tt)+) => {{
		let left = $left;
		let right = $right;
		if left == right {
			::quickcheck::TestResult::passed()
		} else {
			::quickcheck::TestResult::error(
				$crate::common::format_qc_assert_error(&left, &right, Some(format_args!($($arg)+)))
			)
		}
	}};
}

pub fn format_qc_assert_error<L: Debug, R: Debug>(left: &L, right: &R, msg: Option<Arguments>) -> String {
	if let Some(msg) = msg {
		format!(
			"assertion failed `(left == right)`: {msg}\n \
			left: `{left:?}`,\nright: `{right:?}`",
		)
	} else {
		format!(
			"assertion failed `(left == right)`:\n \
			left: `{left:?}`,\nright: `{right:?}`",
		)
	}
}

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// One step of a [`ScriptChannel`].
#[derive(Clone, Debug)]
pub enum Step<T> {
	/// Hands out data, split across reads if the buffer is smaller.
	Data(Vec<T>),
	/// Returns a zero-length read.
	Zero,
	/// Fails the read.
	Fail,
}

/// A channel replaying a script of reads, reporting the end once the script runs
/// out.
pub struct ScriptChannel<T> {
	script: VecDeque<Step<T>>,
	reads: usize,
	closed: Rc<Cell<bool>>,
}

impl<T: Element> ScriptChannel<T> {
	pub fn new(script: impl IntoIterator<Item = Step<T>>) -> Self {
		Self {
			script: script.into_iter().collect(),
			reads: 0,
			closed: Rc::default(),
		}
	}

	/// A channel handing out `data` at most `step` elements per read.
	pub fn trickle(data: &[T], step: usize) -> Self {
		Self::new(data.chunks(step).map(|chunk| Step::Data(chunk.to_vec())))
	}

	/// Returns the number of reads made.
	pub fn reads(&self) -> usize { self.reads }

	/// Returns a flag set when the channel is closed.
	pub fn closed_flag(&self) -> Rc<Cell<bool>> { self.closed.clone() }
}

impl<T: Element> Channel<T> for ScriptChannel<T> {
	fn read_some(&mut self, buf: &mut [T]) -> io::Result<Fill> {
		self.reads += 1;
		match self.script.pop_front() {
			None => Ok(Fill::End),
			Some(Step::Zero) => Ok(Fill::Read(0)),
			Some(Step::Fail) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure")),
			Some(Step::Data(mut data)) => {
				let n = data.len().min(buf.len());
				buf[..n].copy_from_slice(&data[..n]);
				if n < data.len() {
					self.script.push_front(Step::Data(data.split_off(n)));
				}
				Ok(Fill::Read(n))
			}
		}
	}

	fn close(&mut self) -> io::Result<()> {
		self.closed.set(true);
		Ok(())
	}
}

/// A writer failing every write.
pub struct FailingWriter;

impl io::Write for FailingWriter {
	fn write(&mut self, _: &[u8]) -> io::Result<usize> {
		Err(io::Error::new(io::ErrorKind::Other, "sink failure"))
	}

	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

pub fn bytes(len: usize) -> Vec<u8> {
	(0..len).map(|i| i as u8).collect()
}

pub fn chars(len: usize) -> Vec<char> {
	(0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
}
