use crate::proto_feature::DecodeError;

/// Tuning knobs of a decode run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
	/// Maximum nesting of maps, lists and geometry collections.
	pub max_depth: usize,
}

impl Default for DecoderConfig {
	fn default() -> Self {
		Self { max_depth: 256 }
	}
}

impl DecoderConfig {
	/// The depth of a top-level record.
	#[must_use]
	pub fn root_depth(&self) -> Depth {
		Depth {
			current: 0,
			limit: self.max_depth,
		}
	}
}

/// Current nesting level, threaded through the recursive readers and decoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Depth {
	current: usize,
	limit: usize,
}

impl Depth {
	/// Returns the depth one level further down, or `DepthLimitExceeded`.
	pub fn descend(self) -> Result<Depth, DecodeError> {
		if self.current >= self.limit {
			return Err(DecodeError::DepthLimitExceeded { limit: self.limit });
		}
		Ok(Depth {
			current: self.current + 1,
			limit: self.limit,
		})
	}
}
