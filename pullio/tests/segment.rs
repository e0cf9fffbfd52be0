// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;
use pullio::{Reader, Segment, View};

mod common;

use common::{bytes, chars, ScriptChannel};

#[test]
fn empty() {
	let segment = Segment::<u8>::empty(true);
	assert!(segment.is_empty());
	assert!(segment.is_end());
	assert_eq!(segment, Segment::owned(Vec::new(), true));
	assert_ne!(segment, Segment::empty(false));
}

#[test]
fn copy_leaves_data() {
	let data = chars(10);
	let mut reader = Reader::from_slice(&data);
	let segment = reader.read(4).unwrap();
	assert_eq!(segment.copy_vec(), &data[..4]);
	assert_eq!(segment.copy_string(), "abcd");
	assert_eq!(segment.len(), 4);
}

#[test]
fn take_empties_and_keeps_end() {
	let data = bytes(3);
	let mut reader = Reader::from_slice(&data);
	let mut segment = reader.read(8).unwrap();
	assert_eq!(segment.take_vec(), data);
	assert!(segment.is_empty());
	assert!(segment.is_end());
	assert!(segment.take_vec().is_empty());
}

#[test]
fn take_bytes() {
	let data = bytes(16);
	let mut reader = Reader::from_channel(ScriptChannel::trickle(&data, 5));
	let mut segment = reader.read(16).unwrap();
	assert_eq!(segment.copy_bytes(), &data[..]);
	assert_eq!(segment.take_bytes(), &data[..]);
	assert!(segment.is_empty());
}

#[test]
fn into_owned_outlives_reader() {
	let data = bytes(6);
	let owned = {
		let mut reader = Reader::from_channel(ScriptChannel::trickle(&data, 6));
		let segment = reader.read(4).unwrap();
		segment.into_owned()
	};
	assert!(matches!(owned.view(), View::Owned(_)));
	assert!(!owned.is_shared());
	assert!(!owned.is_end());
	assert_eq!(owned.data(), &data[..4]);
}

#[test]
fn clone_is_deep() {
	let data = bytes(6);
	let mut reader = Reader::from_slice(&data);
	let segment = reader.read(6).unwrap();
	let clone = segment.clone();
	assert_eq!(clone, segment);
	assert!(matches!(clone.view(), View::Owned(_)));
	assert_ne!(clone.data().as_ptr(), data.as_ptr());
}

#[test]
fn owned_is_writable() {
	let mut segment = Segment::owned(vec!['a', 'b'], false);
	segment.data_mut().unwrap()[1] = 'c';
	assert_eq!(segment.as_ref(), &['a', 'c']);
	assert_eq!(segment.take_string(), "ac");
}
