//! Tunes to one frequency and prints the tuner and demodulator status.
//!
//! cargo run --example tune -- --freq 175250000 --system B
//! cargo run --example tune -- --freq 482000000 --dtv
use si21xx::error::Result;
use si21xx::tune::{Bandwidth, ColorSystem, Modulation, VideoSystem};
use si21xx::{Config, DtvMode, FirmwareImage, Si21xx, VideoMode};
use std::env;

fn video_system(name: &str) -> VideoSystem {
    match name {
        "B" => VideoSystem::B,
        "GH" => VideoSystem::GH,
        "M" => VideoSystem::M,
        "N" => VideoSystem::N,
        "I" => VideoSystem::I,
        "DK" => VideoSystem::DK,
        "L" => VideoSystem::L,
        "LP" => VideoSystem::LP,
        _ => panic!("Unknown video system: {}", name),
    }
}

fn main() -> Result<()> {
    stderrlog::new().verbosity(log::Level::Info).init().unwrap();

    let mut index = 0;
    let mut freq: u32 = 55_250_000;
    let mut system = VideoSystem::M;
    let mut dtv = false;
    let mut firmware_path: Option<String> = None;

    let args: Vec<String> = env::args().collect();
    let mut args_iter = args.iter().skip(1);
    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--device" | "-d" => {
                index = args_iter.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            }
            "--freq" => {
                freq = args_iter
                    .next()
                    .and_then(|v| v.parse().ok())
                    .expect("--freq needs a frequency in Hz");
            }
            "--system" => system = video_system(args_iter.next().map_or("M", |s| s.as_str())),
            "--dtv" => dtv = true,
            "--firmware" | "-f" => firmware_path = args_iter.next().cloned(),
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
    }

    let data = firmware_path.map(|p| std::fs::read(&p).expect("failed to read firmware"));
    let image = match &data {
        Some(d) => Some(FirmwareImage::new(0x13, d)?),
        None => None,
    };

    let mut tuner = Si21xx::open(index, Config::default())?;
    tuner.init(image.as_ref())?;

    let result = if dtv {
        tuner.dtv_tune(
            freq,
            DtvMode {
                bandwidth: Bandwidth::Bw8Mhz,
                modulation: Modulation::Dvbt,
                invert_spectrum: false,
            },
        )
    } else {
        let color = if system == VideoSystem::L || system == VideoSystem::LP {
            ColorSystem::Secam
        } else {
            ColorSystem::PalNtsc
        };
        tuner.atv_tune(freq, VideoMode::terrestrial(system, color))
    };
    match result {
        Ok(()) => println!("Locked at {} Hz", freq),
        Err(e) if e.is_tune_timeout() => println!("No signal at {} Hz: {}", freq, e),
        Err(e) => return Err(e),
    }

    let status = tuner.tuner_status(true)?;
    println!("RF:   {} Hz, RSSI {} dBm", status.freq_hz, status.rssi);
    if dtv {
        let dtv_status = tuner.dtv_status(true)?;
        println!("DTV:  channel lock {}", dtv_status.chl);
    } else {
        let atv = tuner.atv_status(true)?;
        println!(
            "ATV:  channel lock {}, AFC {} kHz, SNR {}",
            atv.chl, atv.afc_freq, atv.video_snr
        );
    }

    tuner.standby()?;
    tuner.close()?;
    Ok(())
}
