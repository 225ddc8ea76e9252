// Kbdremap CLI
// Grabs one keyboard and re-emits its events through a remapping layout

#[cfg(feature = "pure-rust")]
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "pure-rust")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "pure-rust")]
use clap::Parser;

#[cfg(feature = "pure-rust")]
use kbdremap_core::{
    run_session, Config, DeviceGrab, EventRouter, KeyboardDevice, RouterConfig, SessionEnd,
    Target, UInputSink,
};

/// System-wide keyboard layout remapper with dual-role keys
#[derive(Parser, Debug)]
#[command(name = "kbdremap")]
#[command(version)]
#[command(about = "Remap a keyboard layout system-wide through uinput", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/kbdremap/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Device to remap: name substring or /dev/input/eventN path
    #[arg(short, long, value_name = "DEVICE")]
    device: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Print the compiled layouts and dual-role keys, then exit
    #[arg(long)]
    print_layout: bool,

    /// List available input devices
    #[arg(long)]
    list_devices: bool,
}

/// Main application state
#[cfg(feature = "pure-rust")]
struct Application {
    config: Config,
    args: Args,
    /// Cleared by the signal thread to stop the session
    running: Arc<AtomicBool>,
}

#[cfg(feature = "pure-rust")]
impl Application {
    fn new(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Config::from_toml_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load_default().context("failed to load default config")?,
        };
        if let Some(device) = &args.device {
            config.device = device.clone();
        }

        Ok(Self {
            config,
            args,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    fn compile(&self) -> Result<RouterConfig> {
        self.config.compile().context("invalid configuration")
    }

    fn list_devices() -> Result<()> {
        let devices = KeyboardDevice::list_devices().context("failed to enumerate devices")?;
        println!("Found {} input device(s):", devices.len());
        for device in &devices {
            let marker = if device.has_keys { "" } else { " (no keys)" };
            println!("  {}: {}{}", device.path.display(), device.name, marker);
        }
        Ok(())
    }

    fn install_signal_handler(&self) -> Result<()> {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals =
            Signals::new([SIGINT, SIGTERM]).context("failed to install signal handler")?;
        let running = self.running.clone();
        std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                log::info!("received signal {}, shutting down", signal);
                running.store(false, Ordering::SeqCst);
            }
        });
        Ok(())
    }

    fn run(&self) -> Result<()> {
        // Everything that can fail on config happens before the grab
        let router_config = self.compile()?;

        let device = KeyboardDevice::find(&self.config.device, &self.config.virtual_name)
            .with_context(|| format!("no input device matching '{}'", self.config.device))?;

        let mut keys = router_config.output_keys();
        keys.extend(device.supported_keys());
        let mut sink = UInputSink::new(&self.config.virtual_name, keys)
            .context("failed to create virtual device")?;

        self.install_signal_handler()?;

        let mut router = EventRouter::new(router_config);
        let mut grab = DeviceGrab::acquire(device)?;
        println!(
            "kbdremap is remapping '{}' ({}). Press {} to exit.",
            grab.device().name(),
            grab.device().path().display(),
            router.abort_key()
        );

        match run_session(&mut grab, &mut sink, &mut router, &self.running)? {
            SessionEnd::Aborted => println!("Abort key pressed, exiting."),
            SessionEnd::Interrupted => println!("Shutting down."),
        }
        Ok(())
    }
}

/// Compiled layouts as text. Only keys that change are listed.
#[cfg(feature = "pure-rust")]
fn layout_report(router: &RouterConfig) -> String {
    let mut report = String::new();
    for layout in [&router.primary, &router.secondary] {
        let _ = writeln!(report, "[{}] {} keys", layout.name(), layout.len());
        for (physical, target) in layout.entries() {
            let dual_role = router.registry.is_dual_role(physical);
            if target == Target::Key(physical) && !dual_role {
                continue;
            }
            let marker = if dual_role { " (dual-role)" } else { "" };
            let _ = writeln!(report, "  {:<12} -> {}{}", physical, target, marker);
        }
    }
    let _ = writeln!(report, "[dual_role]");
    for (physical, tap) in router.registry.entries() {
        let _ = writeln!(report, "  {:<12} tap {}", physical, tap);
    }
    match router.registry.toggle_key() {
        Some(toggle) => {
            let _ = writeln!(report, "toggle: {}", toggle);
        }
        None => {
            let _ = writeln!(report, "toggle: none");
        }
    }
    let _ = writeln!(report, "abort: {}", router.abort_key);
    report
}

#[cfg(feature = "pure-rust")]
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

#[cfg(feature = "pure-rust")]
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_devices {
        return Application::list_devices();
    }

    let app = Application::new(args)?;

    if app.args.check_config {
        app.compile()?;
        println!("Configuration is valid");
        return Ok(());
    }

    if app.args.print_layout {
        print!("{}", layout_report(&app.compile()?));
        return Ok(());
    }

    if app.config.device.is_empty() {
        bail!("no input device configured");
    }

    app.run()
}

// Stub for when pure-rust feature is not enabled
#[cfg(not(feature = "pure-rust"))]
fn main() {
    eprintln!("Error: kbdremap binary requires the 'pure-rust' feature to be enabled.");
    eprintln!("Please build with: cargo build --release --features pure-rust --bin kbdremap");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "pure-rust")]
    fn test_args_parsing() {
        let args = Args::parse_from(["kbdremap", "--config", "/tmp/test.toml"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert_eq!(args.device, None);
        assert!(!args.verbose);
        assert!(!args.check_config);
        assert!(!args.print_layout);
        assert!(!args.list_devices);
    }

    #[test]
    #[cfg(feature = "pure-rust")]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "kbdremap",
            "--verbose",
            "--device",
            "/dev/input/event3",
            "--print-layout",
        ]);

        assert_eq!(args.config, None);
        assert!(args.verbose);
        assert!(args.print_layout);
        assert_eq!(args.device.as_deref(), Some("/dev/input/event3"));
    }

    #[test]
    #[cfg(feature = "pure-rust")]
    fn test_args_list_devices() {
        let args = Args::parse_from(["kbdremap", "--list-devices"]);
        assert!(args.list_devices);
    }

    #[test]
    #[cfg(feature = "pure-rust")]
    fn test_args_check_config() {
        let args = Args::parse_from(["kbdremap", "-c", "/tmp/test.toml", "--check-config"]);

        assert!(args.check_config);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    #[cfg(feature = "pure-rust")]
    fn test_layout_report_marks_dual_role_keys() {
        let report = layout_report(&Config::default().compile().unwrap());

        assert!(report.starts_with("[colemak] "));
        assert!(report.contains("  CAPSLOCK     -> LEFTCTRL (dual-role)\n"));
        assert!(report.contains("  RIGHTALT     -> RIGHTSHIFT (dual-role)\n"));
        // Henkan carries the first SPS token but is a plain shift
        assert!(report.contains("  HENKAN       -> RIGHTSHIFT\n"));
        assert!(report.contains("  LEFTCTRL     -> -\n"));
        assert!(report.contains("  CAPSLOCK     tap ESC\n"));
        assert!(report.contains("toggle: COMPOSE\n"));
        assert!(report.ends_with("abort: PAUSE\n"));
    }

    #[test]
    #[cfg(feature = "pure-rust")]
    fn test_device_flag_overrides_config() {
        let args = Args::parse_from(["kbdremap", "-d", "Keychron"]);
        let mut config = Config::default();
        if let Some(device) = &args.device {
            config.device = device.clone();
        }
        assert_eq!(config.device, "Keychron");
    }
}
