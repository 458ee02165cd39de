use std::io::{Read, Write};

use crate::{exp_serde_for_number, SerdeError, SerdeResult};

/// Upper bound on the element count accepted when decoding a collection.
///
/// Lengths are read from untrusted files; anything above this is treated as
/// corruption instead of an allocation request.
pub const MAX_COLLECTION_LEN: usize = 1 << 26;

/// Compact little-endian binary serialization for tree files.
pub trait ExpSerde: Sized {
    /// serialize self into bytes
    fn serialize_into<W: Write>(&self, writer: W) -> SerdeResult<()>;

    /// deserialize bytes into self
    fn deserialize_from<R: Read>(reader: R) -> SerdeResult<Self>;
}

// collection lengths
exp_serde_for_number!(usize, 8);

fn read_length<R: Read>(reader: R) -> SerdeResult<usize> {
    let len = usize::deserialize_from(reader)?;
    if len > MAX_COLLECTION_LEN {
        return Err(SerdeError::LengthOverflow(len));
    }
    Ok(len)
}

impl<V: ExpSerde> ExpSerde for Vec<V> {
    fn serialize_into<W: Write>(&self, mut writer: W) -> SerdeResult<()> {
        self.len().serialize_into(&mut writer)?;
        for v in self.iter() {
            v.serialize_into(&mut writer)?;
        }
        Ok(())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        let len = read_length(&mut reader)?;
        let mut v = Self::default();
        for _ in 0..len {
            v.push(V::deserialize_from(&mut reader)?);
        }
        Ok(v)
    }
}

impl ExpSerde for String {
    fn serialize_into<W: Write>(&self, mut writer: W) -> SerdeResult<()> {
        let bytes = self.as_bytes();
        bytes.len().serialize_into(&mut writer)?;
        writer.write_all(bytes)?;
        Ok(())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        let len = read_length(&mut reader)?;
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|_| SerdeError::DeserializeError)
    }
}
