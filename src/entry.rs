use core::fmt::Write;
use core::slice;

use log::{error, info};

use crate::config::Config;
use crate::error::{Abort, AbortReason, LoadError};
use crate::{halt, init_filesystem, mbr};

/// Loads the kernel named by `config` from `disk` into `dst`.
///
/// A kernel that cannot be loaded is as fatal as a corrupt filesystem at this point, so
/// every failure comes back as an [`Abort`]. Returns the size of the kernel.
pub fn load_kernel(disk: &[u8], config: &Config, dst: &mut [u8]) -> Result<u32, Abort> {
    info!("Loading kernel ...");

    let partition = mbr::locate(disk, config.partition)?;
    let volume = init_filesystem(partition, config)?;

    loaded(config, volume.try_load(config.kernel_path, dst))
}

/// Loads the kernel from the disk mapped at `config.disk_base` to `config.kernel_address`.
///
/// Returns the size of the kernel.
///
/// # Safety
/// `config.disk_base` must be readable for `config.disk_size` bytes and
/// `config.kernel_address` must be writable for the whole kernel. The two regions must
/// not overlap.
pub unsafe fn boot(config: &Config) -> Result<u32, Abort> {
    info!(
        "Loading kernel from disk at {:#x} to {:#x} ...",
        config.disk_base, config.kernel_address
    );

    let disk = unsafe { slice::from_raw_parts(config.disk_base as *const u8, config.disk_size) };
    let partition = mbr::locate(disk, config.partition)?;
    let volume = init_filesystem(partition, config)?;

    loaded(config, unsafe {
        volume.try_load_at(config.kernel_path, config.kernel_address)
    })
}

/// Runs [`boot()`] and halts with the diagnostic on `console` if it aborts.
///
/// # Safety
/// Same as [`boot()`].
pub unsafe fn start<W: Write>(config: &Config, console: &mut W) -> u32 {
    match unsafe { boot(config) } {
        Ok(v) => v,
        Err(e) => halt(&e, console),
    }
}

fn loaded(config: &Config, r: Result<u32, LoadError>) -> Result<u32, Abort> {
    match r {
        Ok(v) => {
            info!("Loaded {} ({v} bytes)", config.kernel_path);
            Ok(v)
        }
        Err(LoadError::Abort(e)) => Err(e),
        Err(e) => {
            error!("Cannot load {}: {e}", config.kernel_path);
            Err(Abort::new(AbortReason::FileNotLoaded(config.kernel_path)))
        }
    }
}
