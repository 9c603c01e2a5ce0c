#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Loads files out of an in-memory FAT12 partition for the second stage boot loader.

use core::fmt::Write;
use log::error;

pub use self::bpb::BiosParameterBlock;
pub use self::config::{Config, PartitionSource};
pub use self::error::{Abort, AbortReason, LoadError};
pub use self::fat12::{DirEntry, Geometry, Link, ShortName, Volume};
pub use self::mem::{Intrinsic, Libc, Memory};

pub mod bpb;
pub mod config;
pub mod entry;
pub mod error;
pub mod fat12;
pub mod mbr;
pub mod mem;

/// Validates the partition in `image` before any file is loaded from it.
pub fn init_filesystem<'a>(image: &'a [u8], config: &Config) -> Result<Volume<'a>, Abort> {
    Volume::new(image, config)
}

/// Writes the diagnostic for `abort` to `out`.
pub fn report<W: Write>(abort: &Abort, out: &mut W) -> core::fmt::Result {
    writeln!(out, "{abort}")
}

/// Prints `abort` and stops forever.
///
/// This is the abort handler of the bare-metal boot path, see [`entry::start()`]. Hosted
/// callers use [`report()`] and exit instead.
pub fn halt<W: Write>(abort: &Abort, out: &mut W) -> ! {
    error!("{abort}");

    // Nothing else can be done if the sink fails too.
    let _ = report(abort, out);

    loop {
        core::hint::spin_loop();
    }
}
