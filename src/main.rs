//! VahanaBase - chassis driver daemon for tracked mobile bases
//!
//! Bridges velocity commands from the transport layer to the chassis and
//! publishes odometry/status snapshots at a fixed rate. Runs against a
//! chassis driver, or fully simulated with the `simulated` config flag.

use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use vahana_base::devices::create_driver;
use vahana_base::messenger::BaseMessenger;
use vahana_base::streaming::{ChannelPublisher, StreamMessage};
use vahana_base::{Config, Error, Result};

/// Parse config path from command line arguments.
///
/// Supports:
/// - `vahana-base <path>` (positional)
/// - `vahana-base --config <path>` (flag-based)
/// - `vahana-base -c <path>` (short flag)
///
/// Defaults to `/etc/vahana.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    // Default path
    "/etc/vahana.toml".to_string()
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("VahanaBase v0.1.0 starting...");

    let config_path = parse_config_path();
    let config = if std::path::Path::new(&config_path).exists() {
        log::info!("Using config: {}", config_path);
        Config::from_file(&config_path)?
    } else {
        log::warn!("Config {} not found, using built-in defaults", config_path);
        Config::default()
    };

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);

    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let (publisher, stream_rx) = ChannelPublisher::new();

    let publish_rate = if config.base.simulated {
        config.control.sim_control_rate
    } else {
        config.control.publish_rate
    };
    let publish_period = Duration::from_secs_f64(1.0 / publish_rate);

    let mut messenger = if config.base.simulated {
        BaseMessenger::simulated(&config, Box::new(publisher))
    } else {
        log::info!("Chassis driver: {}", config.base.driver);
        let driver = Arc::new(Mutex::new(create_driver(&config)?));
        BaseMessenger::with_driver(driver, &config, Box::new(publisher))
    };

    // Stream consumer thread - stands in for the transport layer, which
    // would encode and publish these records.
    let consumer_running = Arc::clone(&running);
    let consumer = thread::Builder::new()
        .name("stream-consumer".to_string())
        .spawn(move || {
            let mut last_log = Instant::now();
            let mut odom_count: u64 = 0;

            while consumer_running.load(Ordering::Relaxed) {
                match stream_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(StreamMessage::Odometry(odom)) => {
                        odom_count += 1;
                        // Throttled to 1Hz
                        if last_log.elapsed() >= Duration::from_secs(1) {
                            log::debug!(
                                "Odometry: x={:.3}m, y={:.3}m, theta={:.3}rad ({} records)",
                                odom.pose.x,
                                odom.pose.y,
                                odom.pose.theta,
                                odom_count
                            );
                            last_log = Instant::now();
                        }
                    }
                    Ok(_) => {}
                    Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
                    Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
                }
            }
        })
        .map_err(|e| Error::Other(format!("Failed to spawn stream consumer: {}", e)))?;

    let mode = if config.base.simulated {
        "simulated"
    } else {
        "chassis"
    };
    log::info!(
        "Publish loop running at {:.0}Hz ({} mode). Press Ctrl-C to stop.",
        publish_rate,
        mode
    );

    // Main publish loop
    let mut overrun_count: u32 = 0;
    while running.load(Ordering::Relaxed) {
        let loop_start = Instant::now();

        let result = if config.base.simulated {
            messenger.publish_sim_state()
        } else {
            messenger.publish_chassis_state()
        };
        if let Err(e) = result {
            log::warn!("Publish failed: {}", e);
        }

        // Check for publish loop overruns
        let loop_duration = loop_start.elapsed();
        if loop_duration > publish_period {
            overrun_count += 1;
            if overrun_count % 10 == 1 {
                log::warn!(
                    "Publish loop overrun - {:.1}ms (target: {:.1}ms), {} overruns",
                    loop_duration.as_secs_f32() * 1000.0,
                    publish_period.as_secs_f32() * 1000.0,
                    overrun_count
                );
            }
        }

        // Maintain publish frequency
        thread::sleep(publish_period.saturating_sub(loop_duration));
    }

    // Shutdown
    log::info!("Shutting down...");
    drop(messenger);
    if let Err(e) = consumer.join() {
        log::error!("Stream consumer panicked: {:?}", e);
    }

    log::info!("VahanaBase stopped");
    Ok(())
}
