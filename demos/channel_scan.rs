//! Scans a band for analog channels and prints what it finds.
//! Ctrl-C stops the scan after the current frequency.
//!
//! cargo run --example channel_scan -- --min 48000000 --max 862000000 --pal
use si21xx::error::Result;
use si21xx::{Config, FixedSound, ScanPlan, ScanThresholds, Si21xx, SoundGroup};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() -> Result<()> {
    stderrlog::new().verbosity(log::Level::Info).init().unwrap();

    let mut index = 0;
    let mut min_hz: u32 = 54_000_000;
    let mut max_hz: u32 = 806_000_000;
    let mut pal = false;
    let mut sound = SoundGroup::BgH;

    let args: Vec<String> = env::args().collect();
    let mut args_iter = args.iter().skip(1);
    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--device" | "-d" => {
                index = args_iter.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            }
            "--min" => min_hz = args_iter.next().and_then(|v| v.parse().ok()).unwrap_or(min_hz),
            "--max" => max_hz = args_iter.next().and_then(|v| v.parse().ok()).unwrap_or(max_hz),
            "--pal" => pal = true,
            "--sound" => {
                sound = match args_iter.next().map(|s| s.as_str()) {
                    Some("BGH") => SoundGroup::BgH,
                    Some("I") => SoundGroup::I,
                    Some("DKL") => SoundGroup::DkL,
                    _ => panic!("--sound must be one of BGH, I, DKL"),
                }
            }
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
    }

    static SHUTDOWN: AtomicBool = AtomicBool::new(false);
    ctrlc::set_handler(|| SHUTDOWN.store(true, Ordering::Relaxed))
        .expect("Error setting Ctrl-C handler");

    let mut tuner = Si21xx::open(index, Config::default())?;
    tuner.init(None)?;

    let thresholds = ScanThresholds::default();
    let progress = |freq: u32, _: usize| {
        eprint!("\r{:>10} Hz", freq);
        SHUTDOWN.load(Ordering::Relaxed)
    };
    let result = if pal {
        tuner
            .scan_pal(min_hz, max_hz, &thresholds, &mut FixedSound(sound), progress)
            .map(|c| c.to_vec())
    } else {
        tuner
            .scan_system_m(min_hz, max_hz, &thresholds, &ScanPlan::system_m(), progress)
            .map(|c| c.to_vec())
    };
    eprintln!();

    // a full channel list still leaves the channels found so far
    let channels = match result {
        Ok(channels) => channels,
        Err(e) => {
            eprintln!("Scan stopped: {}", e);
            tuner.channels().to_vec()
        }
    };
    println!("Found {} channel(s):", channels.len());
    for ch in &channels {
        match ch.standard {
            Some(standard) => println!("  {:>10} Hz  {}", ch.frequency_hz, standard),
            None => println!("  {:>10} Hz", ch.frequency_hz),
        }
    }

    println!("\nClosing device...");
    tuner.close()?;
    Ok(())
}
