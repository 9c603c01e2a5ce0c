use super::volume::Volume;
use crate::error::{Abort, AbortReason};
use crate::mem::Memory;
use byteorder::{ByteOrder, LittleEndian};

/// Data clusters are numbered from 2; 0 and 1 are reserved.
pub const FIRST_CLUSTER: u32 = 2;
pub const LAST_CLUSTER: u32 = 65535;

pub const BAD_CLUSTER: u16 = 0xFFF7;
pub const END_OF_CHAIN: u16 = 0xFFF8;

/// What a FAT value says about the cluster it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Next(u32),
    EndOfChain,
    Bad,
}

impl From<u16> for Link {
    fn from(value: u16) -> Self {
        if value == BAD_CLUSTER {
            Self::Bad
        } else if value >= END_OF_CHAIN {
            Self::EndOfChain
        } else {
            Self::Next(value.into())
        }
    }
}

#[track_caller]
pub fn validate_cluster_index(index: u32) -> Result<u32, Abort> {
    if (FIRST_CLUSTER..=LAST_CLUSTER).contains(&index) {
        Ok(index)
    } else {
        Err(Abort::new(AbortReason::InvalidClusterIndex(index)))
    }
}

impl<M: Memory> Volume<'_, M> {
    /// Returns the FAT value stored for `index`.
    pub fn cluster_value(&self, index: u32) -> Result<u16, Abort> {
        let index = validate_cluster_index(index)?;
        let offset = self.geometry().fat_table_offset + u64::from(index) * 2;
        let raw = self.view(offset, 2)?;

        Ok(LittleEndian::read_u16(raw))
    }

    /// Returns the offset of the data for cluster `index` within the partition.
    pub fn data_offset(&self, index: u32) -> Result<u64, Abort> {
        let index = validate_cluster_index(index)?;
        let geometry = self.geometry();

        Ok(geometry.data_region_offset + u64::from(index - FIRST_CLUSTER) * geometry.cluster_size)
    }
}
