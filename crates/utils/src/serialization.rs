// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use generic_array::{ArrayLength, GenericArray};

#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
	#[error("Write buffer is full")]
	WriteBufferFull,
	#[error("Not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("the encoded value is not canonical")]
	NonCanonicalEncoding,
}

/// Represents type that can be serialized to a byte buffer.
///
/// Every implementation in this workspace writes a fixed number of bytes per value, so that
/// Merkle leaves and transcript messages have a declared length.
pub trait SerializeBytes {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error>;
}

/// Represents type that can be deserialized from a byte buffer.
pub trait DeserializeBytes {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error>
	where
		Self: Sized;
}

/// Serializes a value into a freshly allocated byte vector.
pub fn serialize_to_vec(value: &impl SerializeBytes) -> Result<Vec<u8>, Error> {
	let mut buf = Vec::new();
	value.serialize(&mut buf)?;
	Ok(buf)
}

impl<N: ArrayLength<u8>> SerializeBytes for GenericArray<u8, N> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < N::USIZE {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_slice(self);
		Ok(())
	}
}

impl<N: ArrayLength<u8>> DeserializeBytes for GenericArray<u8, N> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < N::USIZE {
			return Err(Error::NotEnoughBytes);
		}

		let mut ret = Self::default();
		read_buf.copy_to_slice(&mut ret);
		Ok(ret)
	}
}

impl SerializeBytes for u64 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < 8 {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_u64_le(*self);
		Ok(())
	}
}

impl DeserializeBytes for u64 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < 8 {
			return Err(Error::NotEnoughBytes);
		}
		Ok(read_buf.get_u64_le())
	}
}
