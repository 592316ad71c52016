use super::{DecodeError, DictionaryKind, FeatureCollectionRecord};

/// Number of entries in each dictionary of a collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionarySizes {
	pub keys: usize,
	pub doubles: usize,
	pub floats: usize,
	pub int32s: usize,
	pub int64s: usize,
	pub strings: usize,
	pub bytes: usize,
}

/// Read-only view of the collection-wide dictionaries. Every property key and every
/// non-boolean scalar value is stored once here and referenced by index.
#[derive(Clone, Copy, Debug)]
pub struct Dictionary<'a> {
	keys: &'a [String],
	doubles: &'a [f64],
	floats: &'a [f32],
	int32s: &'a [i32],
	int64s: &'a [i64],
	strings: &'a [String],
	bytes: &'a [Vec<u8>],
}

fn lookup<T>(values: &[T], index: u32, dictionary: DictionaryKind) -> Result<&T, DecodeError> {
	values.get(index as usize).ok_or(DecodeError::IndexOutOfRange {
		dictionary,
		index,
		len: values.len(),
	})
}

impl<'a> Dictionary<'a> {
	#[must_use]
	pub fn new(record: &'a FeatureCollectionRecord) -> Self {
		Self {
			keys: &record.keys,
			doubles: &record.double_values,
			floats: &record.float_values,
			int32s: &record.int32_values,
			int64s: &record.int64_values,
			strings: &record.string_values,
			bytes: &record.bytes_values,
		}
	}

	pub fn key(&self, index: u32) -> Result<&'a str, DecodeError> {
		lookup(self.keys, index, DictionaryKind::Key).map(String::as_str)
	}

	pub fn double(&self, index: u32) -> Result<f64, DecodeError> {
		lookup(self.doubles, index, DictionaryKind::Double).copied()
	}

	pub fn float(&self, index: u32) -> Result<f32, DecodeError> {
		lookup(self.floats, index, DictionaryKind::Float).copied()
	}

	pub fn int32(&self, index: u32) -> Result<i32, DecodeError> {
		lookup(self.int32s, index, DictionaryKind::Int32).copied()
	}

	pub fn int64(&self, index: u32) -> Result<i64, DecodeError> {
		lookup(self.int64s, index, DictionaryKind::Int64).copied()
	}

	pub fn string(&self, index: u32) -> Result<&'a str, DecodeError> {
		lookup(self.strings, index, DictionaryKind::String).map(String::as_str)
	}

	pub fn bytes(&self, index: u32) -> Result<&'a [u8], DecodeError> {
		lookup(self.bytes, index, DictionaryKind::Bytes).map(Vec::as_slice)
	}

	#[must_use]
	pub fn sizes(&self) -> DictionarySizes {
		DictionarySizes {
			keys: self.keys.len(),
			doubles: self.doubles.len(),
			floats: self.floats.len(),
			int32s: self.int32s.len(),
			int64s: self.int64s.len(),
			strings: self.strings.len(),
			bytes: self.bytes.len(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record() -> FeatureCollectionRecord {
		FeatureCollectionRecord {
			keys: vec!["a".to_string(), "b".to_string()],
			double_values: vec![1.5],
			float_values: vec![2.5],
			int32_values: vec![-1],
			int64_values: vec![1 << 40],
			string_values: vec!["s".to_string()],
			bytes_values: vec![vec![9, 8]],
			..Default::default()
		}
	}

	#[test]
	fn lookups() {
		let record = record();
		let dict = Dictionary::new(&record);
		assert_eq!(dict.key(1), Ok("b"));
		assert_eq!(dict.double(0), Ok(1.5));
		assert_eq!(dict.float(0), Ok(2.5));
		assert_eq!(dict.int32(0), Ok(-1));
		assert_eq!(dict.int64(0), Ok(1 << 40));
		assert_eq!(dict.string(0), Ok("s"));
		assert_eq!(dict.bytes(0), Ok(&[9u8, 8][..]));
	}

	#[test]
	fn out_of_range_names_dictionary() {
		let record = record();
		let dict = Dictionary::new(&record);
		assert_eq!(
			dict.key(2),
			Err(DecodeError::IndexOutOfRange {
				dictionary: DictionaryKind::Key,
				index: 2,
				len: 2
			})
		);
		assert_eq!(
			dict.bytes(5),
			Err(DecodeError::IndexOutOfRange {
				dictionary: DictionaryKind::Bytes,
				index: 5,
				len: 1
			})
		);
	}

	#[test]
	fn sizes() {
		let record = record();
		let sizes = Dictionary::new(&record).sizes();
		assert_eq!(sizes.keys, 2);
		assert_eq!(sizes.bytes, 1);
		assert_eq!(Dictionary::new(&FeatureCollectionRecord::default()).sizes(), DictionarySizes::default());
	}
}
