use crate::world::{Result, WorldError};

/// Simple bounded cursor over an immutable byte slice.
///
/// All multi-byte reads are little-endian. The position never leaves `[0, len]`.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return the whole underlying buffer.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Return current byte offset.
	pub fn tell(&self) -> usize {
		self.pos
	}

	/// Return total buffer length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when the underlying buffer is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Move to absolute offset `pos`. Seeking exactly to the end is allowed.
	pub fn seek(&mut self, pos: usize) -> Result<()> {
		if pos > self.bytes.len() {
			return Err(WorldError::InvalidOffset {
				offset: pos,
				len: self.bytes.len(),
			});
		}
		self.pos = pos;
		Ok(())
	}

	/// Advance by `n` bytes without decoding them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		let target = self.pos.checked_add(n).ok_or(WorldError::InvalidOffset {
			offset: usize::MAX,
			len: self.bytes.len(),
		})?;
		self.seek(target)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(WorldError::OutOfBounds {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read three consecutive little-endian `f32` values.
	pub fn read_vec3(&mut self) -> Result<[f32; 3]> {
		Ok([self.read_f32_le()?, self.read_f32_le()?, self.read_f32_le()?])
	}

	/// Read exactly `n` bytes as a string, one char per byte.
	pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
		Ok(latin1(self.read_exact(n)?))
	}

	/// Read a zero-terminated string and step past the terminator.
	pub fn read_cstring(&mut self) -> Result<String> {
		let rem = &self.bytes[self.pos..];
		let Some(rel_end) = memchr::memchr(0, rem) else {
			return Err(WorldError::OutOfBounds {
				at: self.pos,
				need: rem.len() + 1,
				rem: rem.len(),
			});
		};

		let text = latin1(&rem[..rel_end]);
		self.pos += rel_end + 1;
		Ok(text)
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}
}

/// Read a little-endian `u32` at `at` without a cursor.
pub(crate) fn u32_at(bytes: &[u8], at: usize) -> Option<u32> {
	let raw = bytes.get(at..at.checked_add(4)?)?;
	Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Read a little-endian `f32` at `at` without a cursor.
pub(crate) fn f32_at(bytes: &[u8], at: usize) -> Option<f32> {
	u32_at(bytes, at).map(f32::from_bits)
}

fn latin1(raw: &[u8]) -> String {
	raw.iter().copied().map(char::from).collect()
}

#[cfg(test)]
mod tests {
	use crate::world::WorldError;
	use crate::world::bytes::{Cursor, f32_at, u32_at};

	#[test]
	fn reads_little_endian_primitives() {
		let mut bytes = vec![7_u8];
		bytes.extend_from_slice(&0x1122_3344_u32.to_le_bytes());
		bytes.extend_from_slice(&1.5_f32.to_le_bytes());
		for value in [1.0_f32, -2.0, 3.25] {
			bytes.extend_from_slice(&value.to_le_bytes());
		}

		let mut cursor = Cursor::new(&bytes);
		assert_eq!(cursor.read_u8().expect("u8"), 7);
		assert_eq!(cursor.read_u32_le().expect("u32"), 0x1122_3344);
		assert_eq!(cursor.read_f32_le().expect("f32"), 1.5);
		assert_eq!(cursor.read_vec3().expect("vec3"), [1.0, -2.0, 3.25]);
		assert_eq!(cursor.tell(), bytes.len());
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn reads_fixed_and_terminated_strings() {
		let mut cursor = Cursor::new(b"OPRWa\\b.p3d\0next\0");
		assert_eq!(cursor.read_fixed_string(4).expect("fixed"), "OPRW");
		assert_eq!(cursor.read_cstring().expect("first"), "a\\b.p3d");
		assert_eq!(cursor.read_cstring().expect("second"), "next");
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn read_past_end_is_out_of_bounds() {
		let mut cursor = Cursor::new(&[1, 2, 3]);
		cursor.skip(1).expect("skip");
		let err = cursor.read_u32_le().expect_err("short read fails");
		assert!(matches!(err, WorldError::OutOfBounds { at: 1, need: 4, rem: 2 }));
		assert_eq!(cursor.tell(), 1, "failed read leaves position unchanged");
	}

	#[test]
	fn unterminated_string_is_out_of_bounds() {
		let mut cursor = Cursor::new(b"abc");
		let err = cursor.read_cstring().expect_err("missing terminator fails");
		assert!(matches!(err, WorldError::OutOfBounds { at: 0, .. }));
	}

	#[test]
	fn seek_allows_end_but_not_beyond() {
		let mut cursor = Cursor::new(&[0; 8]);
		cursor.seek(8).expect("seek to end");
		assert_eq!(cursor.remaining(), 0);

		let err = cursor.seek(9).expect_err("seek past end fails");
		assert!(matches!(err, WorldError::InvalidOffset { offset: 9, len: 8 }));

		cursor.seek(2).expect("seek back");
		let err = cursor.skip(7).expect_err("skip past end fails");
		assert!(matches!(err, WorldError::InvalidOffset { offset: 9, len: 8 }));
		assert_eq!(cursor.tell(), 2);
	}

	#[test]
	fn peeks_without_cursor() {
		let bytes = [0, 0x02, 0, 0, 0];
		assert_eq!(u32_at(&bytes, 1), Some(2));
		assert_eq!(u32_at(&bytes, 2), None);
		assert_eq!(f32_at(&0.5_f32.to_le_bytes(), 0), Some(0.5));
	}
}
