use std::io::{Read, Write};

use serdes::{ExpSerde, SerdeError, SerdeResult};

use crate::{Node, Tree, LEAF_HASH_BYTES};

impl ExpSerde for Node {
    fn serialize_into<W: Write>(&self, mut writer: W) -> SerdeResult<()> {
        writer.write_all(self.as_bytes())?;
        Ok(())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        let mut data = [0u8; LEAF_HASH_BYTES];
        reader.read_exact(&mut data)?;
        Ok(Node { data })
    }
}

impl ExpSerde for Tree {
    fn serialize_into<W: Write>(&self, mut writer: W) -> SerdeResult<()> {
        self.levels.serialize_into(&mut writer)
    }

    /// Only the shape is validated here; use [`Tree::check`] to recompute
    /// the hashes.
    fn deserialize_from<R: Read>(mut reader: R) -> SerdeResult<Self> {
        let levels: Vec<Vec<Node>> = Vec::deserialize_from(&mut reader)?;

        let well_formed = match (levels.first(), levels.last()) {
            (Some(leaves), Some(top)) => {
                !leaves.is_empty()
                    && top.len() == 1
                    && levels
                        .windows(2)
                        .all(|w| w[1].len() == w[0].len().div_ceil(2) && w[0].len() > 1)
            }
            _ => false,
        };
        if !well_formed {
            return Err(SerdeError::DeserializeError);
        }

        Ok(Self { levels })
    }
}
