/// Where the FAT12 partition starts inside the disk image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionSource {
    /// Byte offset from the start of the disk.
    Fixed(usize),
    /// Use the LBA of the first entry in the master boot record.
    Mbr,
}

/// Boot loader settings for locating the filesystem and the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// In-memory address of the disk image, as mapped by the first stage.
    pub disk_base: usize,
    /// Bytes readable from `disk_base`.
    pub disk_size: usize,
    pub partition: PartitionSource,
    pub kernel_path: &'static str,
    /// Address the kernel image is copied to.
    pub kernel_address: usize,
    /// Offset of the boot sector signature, relative to the partition.
    pub signature_offset: usize,
    pub signature: [u8; 2],
}

impl Config {
    pub const DISK_BASE: usize = 0x1000000;
    /// Everything below the kernel.
    pub const DISK_SIZE: usize = Self::KERNEL_ADDRESS - Self::DISK_BASE;
    pub const PARTITION_OFFSET: usize = 0x7E00;
    pub const KERNEL_PATH: &'static str = "KERNEL.BIN";
    pub const KERNEL_ADDRESS: usize = 0x7400000;
    pub const SIGNATURE_OFFSET: usize = 0x1FE;
    pub const SIGNATURE: [u8; 2] = [0x55, 0xAA];

    pub const fn new() -> Self {
        Self {
            disk_base: Self::DISK_BASE,
            disk_size: Self::DISK_SIZE,
            partition: PartitionSource::Fixed(Self::PARTITION_OFFSET),
            kernel_path: Self::KERNEL_PATH,
            kernel_address: Self::KERNEL_ADDRESS,
            signature_offset: Self::SIGNATURE_OFFSET,
            signature: Self::SIGNATURE,
        }
    }

    pub const fn with_partition(mut self, partition: PartitionSource) -> Self {
        self.partition = partition;
        self
    }

    pub const fn with_kernel_path(mut self, path: &'static str) -> Self {
        self.kernel_path = path;
        self
    }

    /// Points the loader at a disk mapped at `base`.
    pub const fn with_disk(mut self, base: usize, size: usize) -> Self {
        self.disk_base = base;
        self.disk_size = size;
        self
    }

    pub const fn with_kernel_address(mut self, address: usize) -> Self {
        self.kernel_address = address;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
