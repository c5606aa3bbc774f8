//! Powers up the tuner behind an RTL2832U bridge and prints what it reports.
//!
//! Options:
//!
//! - `--device <index>` or `-d <index>`: bridge to open, default 0.
//! - `--firmware <path>` or `-f <path>`: patch image to load, in 8-byte lines.
//! - `--rom <id>` or `-r <id>`: ROM id the patch targets, hex, default 0x13.
//!
//! cargo run --example part_info -- -f si2176_patch.bin
use si21xx::{error::Result, Config, FirmwareImage, Si21xx};
use std::env;

fn main() -> Result<()> {
    stderrlog::new().verbosity(log::Level::Info).init().unwrap();

    let mut index = 0;
    let mut firmware_path: Option<String> = None;
    let mut rom_id = 0x13;

    let args: Vec<String> = env::args().collect();
    let mut args_iter = args.iter().skip(1);
    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--device" | "-d" => {
                index = args_iter.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            }
            "--firmware" | "-f" => firmware_path = args_iter.next().cloned(),
            "--rom" | "-r" => {
                if let Some(v) = args_iter.next() {
                    rom_id = u8::from_str_radix(v.trim_start_matches("0x"), 16)
                        .expect("ROM id must be hex");
                }
            }
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
    }

    let data = firmware_path.map(|p| std::fs::read(&p).expect("failed to read firmware"));
    let image = match &data {
        Some(d) => Some(FirmwareImage::new(rom_id, d)?),
        None => None,
    };

    let mut tuner = Si21xx::open(index, Config::default())?;
    let info = tuner.power_up_with_patch(image.as_ref())?;
    println!("Part:     Si21{:02}", info.part);
    println!("Chip rev: {}", info.chiprev);
    println!("Patch:    {}.{} build {}", info.pmajor as char, info.pminor as char, info.pbuild);
    println!("ROM id:   {:#04x}", info.romid);
    println!("Serial:   {:08x}", info.serial);

    let rev = tuner.get_rev()?;
    println!(
        "Firmware: {}.{} patch {:#06x}, component {}.{}.{}",
        rev.fwmajor as char,
        rev.fwminor as char,
        rev.patch,
        rev.cmpmajor as char,
        rev.cmpminor as char,
        rev.cmpbuild
    );

    tuner.standby()?;
    tuner.close()?;
    Ok(())
}
