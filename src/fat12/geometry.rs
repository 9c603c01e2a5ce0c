use super::structs::ENTRY_SIZE;
use crate::bpb::BiosParameterBlock;

/// Byte layout of the partition, derived from the BPB.
///
/// All offsets are relative to the start of the partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cluster_size: u64,
    pub fat_table_offset: u64,
    pub root_dir_offset: u64,
    pub root_dir_size: u64,
    pub data_region_offset: u64,
}

impl Geometry {
    pub fn new(bpb: &BiosParameterBlock) -> Self {
        let bytes_per_sector = u64::from(bpb.bytes_per_sector);
        let reserved_size = u64::from(bpb.reserved_sectors) * bytes_per_sector;
        let fat_size =
            u64::from(bpb.num_fats) * u64::from(bpb.sectors_per_fat) * bytes_per_sector;
        let root_dir_size = u64::from(bpb.root_entries) * ENTRY_SIZE as u64;

        Self {
            cluster_size: bytes_per_sector * u64::from(bpb.sectors_per_cluster),
            fat_table_offset: reserved_size,
            root_dir_offset: reserved_size + fat_size,
            root_dir_size,
            data_region_offset: reserved_size + fat_size + root_dir_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floppy_layout() {
        // 1.44M floppy.
        let bpb = BiosParameterBlock {
            bytes_per_sector: 512,
            sectors_per_cluster: 1,
            reserved_sectors: 1,
            num_fats: 2,
            root_entries: 224,
            total_sectors_16: 2880,
            media: 0xF0,
            sectors_per_fat: 9,
        };
        let geometry = Geometry::new(&bpb);

        assert_eq!(geometry.cluster_size, 512);
        assert_eq!(geometry.fat_table_offset, 512);
        assert_eq!(geometry.root_dir_offset, 19 * 512);
        assert_eq!(geometry.root_dir_size, 224 * 32);
        assert_eq!(geometry.data_region_offset, 33 * 512);
    }
}
