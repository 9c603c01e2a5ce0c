//! Builds small FAT12 partition images in memory.
//!
//! Layout: 32-byte sectors, one sector per cluster, 16 reserved sectors (so the boot
//! signature at 0x1FE falls inside them), 2 FATs of 4 sectors, 16 root entries.

#![allow(dead_code)]

pub const SECTOR_SIZE: usize = 32;
pub const CLUSTER_SIZE: usize = SECTOR_SIZE;
pub const RESERVED_SECTORS: usize = 16;
pub const FAT_COUNT: usize = 2;
pub const SECTORS_PER_FAT: usize = 4;
pub const ROOT_ENTRIES: usize = 16;
pub const CLUSTER_COUNT: usize = SECTORS_PER_FAT * SECTOR_SIZE / 2;

pub const FAT_OFFSET: usize = RESERVED_SECTORS * SECTOR_SIZE;
pub const ROOT_OFFSET: usize = FAT_OFFSET + FAT_COUNT * SECTORS_PER_FAT * SECTOR_SIZE;
pub const DATA_OFFSET: usize = ROOT_OFFSET + ROOT_ENTRIES * 32;

pub const EOC: u16 = 0xFFFF;
pub const BAD: u16 = 0xFFF7;

pub struct Image {
    bytes: Vec<u8>,
}

impl Image {
    pub fn new() -> Self {
        let mut bytes = vec![0u8; DATA_OFFSET + (CLUSTER_COUNT - 2) * CLUSTER_SIZE];

        bytes[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
        bytes[3..11].copy_from_slice(b"MSWIN4.1");
        bytes[11..13].copy_from_slice(&(SECTOR_SIZE as u16).to_le_bytes());
        bytes[13] = (CLUSTER_SIZE / SECTOR_SIZE) as u8;
        bytes[14..16].copy_from_slice(&(RESERVED_SECTORS as u16).to_le_bytes());
        bytes[16] = FAT_COUNT as u8;
        bytes[17..19].copy_from_slice(&(ROOT_ENTRIES as u16).to_le_bytes());
        bytes[21] = 0xF8;
        bytes[22..24].copy_from_slice(&(SECTORS_PER_FAT as u16).to_le_bytes());
        bytes[0x1FE] = 0x55;
        bytes[0x1FF] = 0xAA;

        let mut image = Self { bytes };

        image.link(0, 0xFFF8).link(1, 0xFFFF);
        image
    }

    /// Writes root directory record `index`.
    pub fn entry(
        &mut self,
        index: usize,
        name: &[u8; 11],
        attributes: u8,
        cluster: u16,
        size: u32,
    ) -> &mut Self {
        let at = ROOT_OFFSET + index * 32;
        let raw = &mut self.bytes[at..(at + 32)];

        raw.fill(0);
        raw[..11].copy_from_slice(name);
        raw[11] = attributes;
        raw[26..28].copy_from_slice(&cluster.to_le_bytes());
        raw[28..32].copy_from_slice(&size.to_le_bytes());
        self
    }

    /// Sets the FAT value of `cluster` in every FAT copy.
    pub fn link(&mut self, cluster: u16, value: u16) -> &mut Self {
        for fat in 0..FAT_COUNT {
            let at = FAT_OFFSET + fat * SECTORS_PER_FAT * SECTOR_SIZE + cluster as usize * 2;

            self.bytes[at..(at + 2)].copy_from_slice(&value.to_le_bytes());
        }

        self
    }

    /// Writes `data` at the start of `cluster`.
    pub fn fill(&mut self, cluster: u16, data: &[u8]) -> &mut Self {
        assert!(data.len() <= CLUSTER_SIZE);

        let at = DATA_OFFSET + (cluster as usize - 2) * CLUSTER_SIZE;

        self.bytes[at..(at + data.len())].copy_from_slice(data);
        self
    }

    /// Stores `data` in `clusters`, chained in the given order, and points record
    /// `index` at it.
    pub fn store(&mut self, index: usize, name: &[u8; 11], clusters: &[u16], data: &[u8]) -> &mut Self {
        for (i, chunk) in data.chunks(CLUSTER_SIZE).enumerate() {
            self.fill(clusters[i], chunk);
        }

        for pair in clusters.windows(2) {
            self.link(pair[0], pair[1]);
        }

        if let Some(&last) = clusters.last() {
            self.link(last, EOC);
        }

        self.entry(index, name, 0x20, clusters[0], data.len() as u32)
    }

    pub fn set(&mut self, offset: usize, value: u8) -> &mut Self {
        self.bytes[offset] = value;
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Deterministic test data.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed))
        .collect()
}
