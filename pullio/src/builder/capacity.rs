// SPDX-License-Identifier: Apache-2.0

use std::cmp::max;

/// A failure to plan a capacity large enough for a write.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CapacityError {
	#[error("required capacity {required} exceeds the fixed maximum of {max}")]
	Fixed {
		required: usize,
		max: usize,
	},
	#[error("required capacity {required} exceeds the allocation ceiling of {ceiling}")]
	Ceiling {
		required: usize,
		ceiling: usize,
	},
	#[error("required capacity overflows usize")]
	Overflow,
	#[error("failed to allocate {required} elements")]
	Allocation {
		required: usize,
	},
}

/// Plans the capacity needed to hold `needed` elements, growing from `current`.
///
/// The new capacity is the larger of `needed` and double `current`, clamped to
/// `max` if set, then to `ceiling`. Fails if `needed` exceeds `max` or `ceiling`.
pub fn plan_capacity(
	current: usize,
	needed: usize,
	max_capacity: Option<usize>,
	ceiling: usize,
) -> Result<usize, CapacityError> {
	if let Some(max) = max_capacity {
		if needed > max {
			return Err(CapacityError::Fixed { required: needed, max })
		}
	}

	if needed > ceiling {
		return Err(CapacityError::Ceiling { required: needed, ceiling })
	}

	let mut capacity = max(needed, current.saturating_mul(2));
	if let Some(max) = max_capacity {
		capacity = capacity.min(max);
	}
	Ok(capacity.min(ceiling))
}
