use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Abort, AbortReason};

/// Bytes of the boot sector needed to decode the fields below.
const BPB_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiosParameterBlock {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub num_fats: u8,
    pub root_entries: u16,
    pub total_sectors_16: u16,
    pub media: u8,
    pub sectors_per_fat: u16,
}

impl BiosParameterBlock {
    /// Decodes the BPB at the start of `image` once its boot signature checks out.
    pub fn new(image: &[u8], signature_offset: usize, signature: [u8; 2]) -> Result<Self, Abort> {
        check_signature(image, signature_offset, signature)?;

        let buf = image.get(..BPB_LEN).ok_or_else(|| {
            Abort::new(AbortReason::OutOfBounds {
                offset: 0,
                len: BPB_LEN as u64,
            })
        })?;

        Ok(BiosParameterBlock {
            bytes_per_sector: LittleEndian::read_u16(&buf[11..13]),
            sectors_per_cluster: buf[13],
            reserved_sectors: LittleEndian::read_u16(&buf[14..16]),
            num_fats: buf[16],
            root_entries: LittleEndian::read_u16(&buf[17..19]),
            total_sectors_16: LittleEndian::read_u16(&buf[19..21]),
            media: buf[21],
            sectors_per_fat: LittleEndian::read_u16(&buf[22..24]),
        })
    }
}

/// Fails unless `image` carries `signature` at `offset`.
pub fn check_signature(image: &[u8], offset: usize, signature: [u8; 2]) -> Result<(), Abort> {
    let found = match image.get(offset..offset.saturating_add(2)) {
        Some(v) => [v[0], v[1]],
        None => {
            return Err(Abort::new(AbortReason::OutOfBounds {
                offset: offset as u64,
                len: 2,
            }))
        }
    };

    if found != signature {
        return Err(Abort::new(AbortReason::InvalidSignature { offset, found }));
    }

    Ok(())
}
