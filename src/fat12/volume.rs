use core::cmp::min;
use core::slice::ChunksExact;
use log::{debug, trace, warn};

use super::chain::{validate_cluster_index, Link};
use super::geometry::Geometry;
use super::path::ShortName;
use super::structs::{DirEntry, ENTRY_SIZE};
use crate::bpb::BiosParameterBlock;
use crate::config::Config;
use crate::error::{Abort, AbortReason, LoadError};
use crate::mem::{Intrinsic, Memory};

/// A FAT12 partition mapped in memory.
///
/// The image is only ever read. Every lookup starts from scratch, so a `Volume` can be
/// used for any number of loads.
pub struct Volume<'a, M: Memory = Intrinsic> {
    image: &'a [u8],
    bpb: BiosParameterBlock,
    geometry: Geometry,
    mem: M,
}

impl<'a> Volume<'a, Intrinsic> {
    pub fn new(image: &'a [u8], config: &Config) -> Result<Self, Abort> {
        Self::with_memory(image, config, Intrinsic)
    }
}

impl<'a, M: Memory> Volume<'a, M> {
    /// Checks the boot signature of `image` and resolves its geometry.
    ///
    /// Nothing besides the signature is read when it does not match.
    pub fn with_memory(image: &'a [u8], config: &Config, mem: M) -> Result<Self, Abort> {
        let bpb = BiosParameterBlock::new(image, config.signature_offset, config.signature)?;
        let geometry = Geometry::new(&bpb);

        if geometry.cluster_size == 0 {
            return Err(Abort::new(AbortReason::InvalidGeometry));
        }

        debug!(
            "FAT at {:#x}, root directory at {:#x} ({} entries), data at {:#x}, {} bytes per cluster",
            geometry.fat_table_offset,
            geometry.root_dir_offset,
            bpb.root_entries,
            geometry.data_region_offset,
            geometry.cluster_size
        );

        Ok(Self {
            image,
            bpb,
            geometry,
            mem,
        })
    }

    pub fn bpb(&self) -> &BiosParameterBlock {
        &self.bpb
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns `len` bytes of the image starting at `offset`.
    #[track_caller]
    pub(crate) fn view(&self, offset: u64, len: u64) -> Result<&'a [u8], Abort> {
        let range = offset.checked_add(len).and_then(|end| {
            let start = usize::try_from(offset).ok()?;
            let end = usize::try_from(end).ok()?;

            Some(start..end)
        });

        match range.and_then(|r| self.image.get(r)) {
            Some(v) => Ok(v),
            None => Err(Abort::new(AbortReason::OutOfBounds { offset, len })),
        }
    }

    /// Live records of the root directory, in on-disk order.
    ///
    /// Never used, deleted and long file name records are skipped.
    pub fn entries(&self) -> Result<Entries<'a>, Abort> {
        let region = self.view(self.geometry.root_dir_offset, self.geometry.root_dir_size)?;

        Ok(Entries {
            records: region.chunks_exact(ENTRY_SIZE),
        })
    }

    /// Looks up `path` in the root directory.
    ///
    /// Returns [`None`] if the file does not exist or `path` is not an 8.3 name.
    pub fn find(&self, path: &str) -> Result<Option<DirEntry>, Abort> {
        match ShortName::parse(path) {
            Some(name) => self.search(&name),
            None => Ok(None),
        }
    }

    fn search(&self, name: &ShortName) -> Result<Option<DirEntry>, Abort> {
        for entry in self.entries()? {
            if self.mem.equal(entry.name(), &name.name) && self.mem.equal(entry.ext(), &name.ext) {
                debug!(
                    "Found {} at cluster {} ({} bytes)",
                    entry.display_name(),
                    entry.cluster_index(),
                    entry.file_size()
                );

                return Ok(Some(entry));
            }
        }

        Ok(None)
    }

    /// Copies `size` bytes of the cluster chain starting at `first` into `dst`.
    ///
    /// The cluster that ends the chain supplies all of the remaining bytes, read
    /// contiguously from its data offset. Returns the number of bytes copied. Nothing
    /// past `dst[..size]` is written.
    pub fn read_raw(&self, first: u32, dst: &mut [u8], size: u32) -> Result<u32, Abort> {
        let mut cluster = validate_cluster_index(first)?;
        let size = size as usize;
        let available = dst.len();
        let dst = match dst.get_mut(..size) {
            Some(v) => v,
            None => {
                return Err(Abort::new(AbortReason::DestinationTooSmall {
                    needed: size,
                    available,
                }))
            }
        };

        let mut read = 0;

        while read < size {
            let offset = self.data_offset(cluster)?;
            let link = Link::from(self.cluster_value(cluster)?);

            trace!("Cluster {cluster} at {offset:#x} -> {link:?}");

            if link == Link::Bad {
                return Err(Abort::new(AbortReason::BadCluster(cluster)));
            }

            // The end of the chain takes whatever is left, even past the cluster.
            let remaining = (size - read) as u64;
            let len = match link {
                Link::EndOfChain => remaining,
                _ => min(remaining, self.geometry.cluster_size),
            } as usize;
            let src = self.view(offset, len as u64)?;

            self.mem.copy(&mut dst[read..(read + len)], src);
            read += len;

            match link {
                Link::Next(next) => cluster = next,
                Link::EndOfChain | Link::Bad => break,
            }
        }

        Ok(read as u32)
    }

    /// Loads `path` into `dst` and returns the size of the file.
    pub fn try_load(&self, path: &str, dst: &mut [u8]) -> Result<u32, LoadError> {
        self.load_with(path, |_| dst)
    }

    /// Same as [`Self::try_load()`] but writes to a raw address.
    ///
    /// # Safety
    /// `address` must be valid for writes of the whole file and must not overlap the
    /// image.
    pub unsafe fn try_load_at(&self, path: &str, address: usize) -> Result<u32, LoadError> {
        self.load_with(path, |entry| unsafe {
            core::slice::from_raw_parts_mut(address as *mut u8, entry.file_size() as usize)
        })
    }

    /// Loads `path` into `dst`.
    ///
    /// Returns `false` if the file cannot be found or was not read completely. Corruption
    /// is reported as an [`Abort`].
    pub fn load_file(&self, path: &str, dst: &mut [u8]) -> Result<bool, Abort> {
        Self::fold(path, self.try_load(path, dst))
    }

    /// Same as [`Self::load_file()`] but writes to a raw address.
    ///
    /// # Safety
    /// `address` must be valid for writes of the whole file and must not overlap the
    /// image.
    pub unsafe fn load_file_at(&self, path: &str, address: usize) -> Result<bool, Abort> {
        Self::fold(path, unsafe { self.try_load_at(path, address) })
    }

    fn load_with<'d, F>(&self, path: &str, dst: F) -> Result<u32, LoadError>
    where
        F: FnOnce(&DirEntry) -> &'d mut [u8],
    {
        let name = ShortName::parse(path).ok_or(LoadError::UnsupportedPath)?;
        let entry = self.search(&name)?.ok_or(LoadError::NotFound)?;
        let expected = entry.file_size();
        let read = self.read_raw(entry.cluster_index().into(), dst(&entry), expected)?;

        if read != expected {
            return Err(LoadError::Truncated { expected, read });
        }

        Ok(read)
    }

    fn fold(path: &str, r: Result<u32, LoadError>) -> Result<bool, Abort> {
        match r {
            Ok(_) => Ok(true),
            Err(LoadError::Abort(e)) => Err(e),
            Err(e) => {
                warn!("Cannot load {path}: {e}");
                Ok(false)
            }
        }
    }
}

/// Iterator returned by [`Volume::entries()`].
pub struct Entries<'a> {
    records: ChunksExact<'a, u8>,
}

impl Iterator for Entries<'_> {
    type Item = DirEntry;

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.records.by_ref() {
            let entry = match raw.try_into() {
                Ok(v) => DirEntry::from_bytes(v),
                Err(_) => continue,
            };

            if entry.is_live() && !entry.is_long_filename() {
                return Some(entry);
            }
        }

        None
    }
}
