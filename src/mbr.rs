use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::config::PartitionSource;
use crate::error::{Abort, AbortReason};

/// Offset of the partition table in the master boot record.
pub const PARTITION_TABLE: usize = 0x1BE;

/// Offset of the starting LBA inside a partition table entry.
const ENTRY_LBA: usize = 8;

const SECTOR_SIZE: u64 = 512;

/// Returns the part of `disk` holding the filesystem.
pub fn locate(disk: &[u8], source: PartitionSource) -> Result<&[u8], Abort> {
    let offset = match source {
        PartitionSource::Fixed(v) => v as u64,
        PartitionSource::Mbr => {
            let at = PARTITION_TABLE + ENTRY_LBA;
            let lba = match disk.get(at..(at + 4)) {
                Some(v) => LittleEndian::read_u32(v),
                None => {
                    return Err(Abort::new(AbortReason::OutOfBounds {
                        offset: at as u64,
                        len: 4,
                    }))
                }
            };

            if lba == 0 {
                return Err(Abort::new(AbortReason::NoPartition));
            }

            debug!("First partition starts at LBA {lba}");

            u64::from(lba) * SECTOR_SIZE
        }
    };

    match usize::try_from(offset).ok().and_then(|v| disk.get(v..)) {
        Some(v) => Ok(v),
        None => Err(Abort::new(AbortReason::OutOfBounds {
            offset,
            len: 0,
        })),
    }
}
