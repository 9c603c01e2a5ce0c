use std::env;
use std::fs;
use std::io;
use std::process;

use fat12::{mbr, Abort, Config, PartitionSource, Volume};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <disk_image> [FILE] [--mbr] [--out PATH]", args[0]);
        process::exit(1);
    }

    let mut config = Config::new().with_partition(PartitionSource::Fixed(0));
    let mut file: Option<&str> = None;
    let mut out: Option<&str> = None;
    let mut rest = args[2..].iter();

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--mbr" => config = config.with_partition(PartitionSource::Mbr),
            "--out" => match rest.next() {
                Some(v) => out = Some(v.as_str()),
                None => {
                    eprintln!("--out requires a path");
                    process::exit(1);
                }
            },
            v => file = Some(v),
        }
    }

    let filename = &args[1];

    println!("Opening image: {}", filename);

    let disk = match fs::read(filename) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Cannot read {}: {}", filename, e);
            process::exit(1);
        }
    };

    let path = file.unwrap_or(config.kernel_path);

    match run(&disk, &config, path, out) {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("Cannot load {}", path);
            process::exit(1);
        }
        Err(e) => {
            let mut msg = String::new();
            let _ = fat12::report(&e, &mut msg);
            eprint!("{}", msg);
            process::exit(1);
        }
    }
}

fn run(disk: &[u8], config: &Config, path: &str, out: Option<&str>) -> Result<bool, Abort> {
    let partition = mbr::locate(disk, config.partition)?;
    let volume = fat12::init_filesystem(partition, config)?;
    let bpb = volume.bpb();
    let geometry = volume.geometry();

    println!("--- BPB ---");
    println!("Bytes per sector    : {}", bpb.bytes_per_sector);
    println!("Sectors per cluster : {}", bpb.sectors_per_cluster);
    println!("Reserved sectors    : {}", bpb.reserved_sectors);
    println!("Number of FATs      : {}", bpb.num_fats);
    println!("Sectors per FAT     : {}", bpb.sectors_per_fat);
    println!("Root entries        : {}", bpb.root_entries);
    println!("Data region         : {:#x}", geometry.data_region_offset);
    println!("Signature           : OK");

    list_root(&volume)?;

    let entry = match volume.find(path)? {
        Some(v) => v,
        None => return Ok(false),
    };

    let mut buf = vec![0u8; entry.file_size() as usize];

    if !volume.load_file(path, &mut buf)? {
        return Ok(false);
    }

    println!("Loaded {} ({} bytes)", path, buf.len());

    if let Some(out) = out {
        if let Err(e) = write_out(out, &buf) {
            eprintln!("Cannot write {}: {}", out, e);
            return Ok(false);
        }
    }

    Ok(true)
}

fn list_root(volume: &Volume<'_>) -> Result<(), Abort> {
    println!("--- Root directory ---");

    for entry in volume.entries()? {
        if entry.is_volume_label() && !entry.is_directory() {
            continue;
        }

        let kind = if entry.is_directory() { "DIR " } else { "FILE" };

        println!(
            "{} {:<12} (size: {} bytes, cluster: {})",
            kind,
            entry.display_name().to_string(),
            entry.file_size(),
            entry.cluster_index()
        );
    }

    Ok(())
}

fn write_out(path: &str, data: &[u8]) -> io::Result<()> {
    fs::write(path, data)?;
    println!("Wrote {}", path);
    Ok(())
}
