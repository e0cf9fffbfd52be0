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

use std::fmt::Debug;
use std::mem;

/// A primitive stream element: a byte or a character. Readers, segments, and
/// builders are written once over this trait.
pub trait Element: Copy + Default + Debug + PartialEq + Unpin + 'static {
	const SIZE: usize = mem::size_of::<Self>();

	/// The largest element count a single allocation may hold on this platform.
	const MAX_CAPACITY: usize = isize::MAX as usize / Self::SIZE;
}

macro_rules! generate {
    ($($ty:ident)+) => {
		$(
		impl Element for $ty { }
		)+
	};
}

generate! { u8 char }
