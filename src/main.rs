use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

use city_weather::app::{WeatherApp, WINDOW_SIZE, WINDOW_TITLE};
use city_weather::config::{load_env_file, Config};
use city_weather::presentation::ReadingView;
use city_weather::weather::{OpenWeatherClient, Query, WeatherSource};

/// Current weather for a city, themed by conditions.
#[derive(Debug, Parser)]
#[command(name = "city-weather", version)]
struct Args {
    /// City to search for as soon as the window opens
    #[arg(long)]
    city: Option<String>,

    /// Read OPENWEATHER_API_KEY from this file before the usual .env locations
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Skip the window: do one lookup and print the result
    #[arg(long)]
    check: bool,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_module("city_weather", LevelFilter::Debug);
    }
    builder.init();
}

/// One lookup without the window, for checking the key and connectivity.
fn run_check(config: &Config, city: &str) -> anyhow::Result<()> {
    let client = OpenWeatherClient::new(config).context("failed to start HTTP runtime")?;
    let query = Query::parse(city)?;
    let api_key = config.api_key()?;

    let reading = client.current(&query, api_key)?;
    let view = ReadingView::new(&reading);
    println!("{}", view.location);
    println!("Weather: {}", reading.condition);
    println!("Temp: {}", reading.temperature_c);
    println!("Theme: {}", view.theme.name);
    Ok(())
}

fn run_app(config: Config, initial_city: Option<String>) -> anyhow::Result<()> {
    let client = OpenWeatherClient::new(&config).context("failed to start HTTP runtime")?;

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(WINDOW_SIZE[0], WINDOW_SIZE[1])),
        resizable: false,
        ..Default::default()
    };

    info!("starting window");
    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(WeatherApp::new(config, client, initial_city))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Error running egui: {}", e))
}

fn wait_for_enter() {
    eprintln!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    load_env_file(args.env_file.as_deref());
    let config = Config::from_env();

    if args.check {
        let city = args.city.as_deref().unwrap_or("London");
        return run_check(&config, city);
    }

    if let Err(e) = run_app(config, args.city) {
        eprintln!("CRITICAL ERROR: {:#}", e);
        wait_for_enter();
        return Err(e);
    }
    Ok(())
}
