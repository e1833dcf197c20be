//! SmartLight firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     LogEventSink   PublishSink   Esp32Time    │
//! │  (Sensor+Actuator)   (EventSink)    (EventSink)   (clock)      │
//! │  MqttTransport ──▶ inbox            WifiStation                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  decide · handle · report                              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Runtime: inbox drain · Scheduler (sample / report cadences)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info, warn};

use smartlight::FIRMWARE_VERSION;
use smartlight::adapters::hardware::HardwareAdapter;
use smartlight::adapters::log_sink::LogEventSink;
use smartlight::adapters::mqtt::MqttTransport;
use smartlight::adapters::publish_sink::PublishSink;
use smartlight::adapters::time::Esp32TimeAdapter;
use smartlight::adapters::wifi::WifiStation;
use smartlight::app::ports::{MicrosClock, Subscriber};
use smartlight::app::router::CommandRouter;
use smartlight::config::SystemConfig;
use smartlight::drivers::gpio::{BusyDelay, RawInput, RawOutput};
use smartlight::drivers::hw_init;
use smartlight::drivers::indicator_led::IndicatorLed;
use smartlight::pins;
use smartlight::runtime::Runtime;
use smartlight::sensors::SensorHub;
use smartlight::sensors::distance::DistanceSensor;
use smartlight::sensors::light::LightSensor;

/// Upper bound on one idle sleep so inbound commands are picked up promptly.
const MAX_IDLE_MS: u64 = 20;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartLight {:<24} ║", FIRMWARE_VERSION);
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(smartlight::error::Error::from).context("config")?;
    info!(
        "Config: cds<{} | distance<{:.1}cm | sample={}ms report={}ms | echo bound {}us ({:.0}cm)",
        config.brightness_threshold,
        config.distance_threshold_cm,
        config.sample_interval_ms,
        config.report_interval_ms,
        config.echo_timeout_us,
        config.distance_sentinel_cm(),
    );

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        return Err(smartlight::error::Error::from(e)).context("hw_init");
    }
    let clock = Esp32TimeAdapter::new();

    let range = DistanceSensor::new(
        RawOutput::new(pins::TRIGGER_GPIO),
        RawInput::new(pins::ECHO_GPIO),
        BusyDelay,
        &clock,
        config.echo_timeout_us,
        config.distance_sentinel_cm(),
    );
    let hw = HardwareAdapter::new(
        SensorHub::new(LightSensor::new(pins::CDS_ADC1_CHANNEL), range),
        IndicatorLed::new(pins::NEAR_PROXIMITY_LED_GPIO),
        IndicatorLed::new(pins::LOW_LIGHT_LED_GPIO),
        IndicatorLed::new(pins::MODE_LED_GPIO),
    );

    // ── 4. Network ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take().ok();
    let esp_wifi = EspWifi::new(peripherals.modem, sysloop.clone(), nvs)?;
    let mut wifi = WifiStation::new(BlockingWifi::wrap(esp_wifi, sysloop)?);
    wifi.set_credentials(&config.wifi_ssid, &config.wifi_password)
        .map_err(smartlight::error::CommsError::from)
        .map_err(smartlight::error::Error::from)
        .context("wifi credentials")?;
    while let Err(e) = wifi.connect() {
        warn!("WiFi: {} (retrying in 5s)", e);
        FreeRtos::delay_ms(5_000);
    }

    let mut mqtt = loop {
        match MqttTransport::connect(&config.mqtt_url, &config.topic_prefix) {
            Ok(m) => break m,
            Err(e) => {
                warn!("{} (retrying in 5s)", e);
                FreeRtos::delay_ms(5_000);
            }
        }
    };

    let router = CommandRouter::standard();
    for topic in router.topics() {
        if let Err(e) = mqtt.subscribe(topic) {
            warn!("subscribe '{}' failed: {}", topic, e);
        }
    }

    // ── 5. Control loop ───────────────────────────────────────
    let sink = (LogEventSink::new(), PublishSink::new(mqtt));
    let mut runtime = Runtime::new(&config, router, hw, sink);
    runtime.start();
    info!("System ready. Entering control loop.");

    loop {
        let now_ms = clock.now_ms();
        wifi.poll(now_ms);
        runtime.sink_mut().1.publisher_mut().poll();

        let step = runtime.step(now_ms);
        FreeRtos::delay_ms(step.idle_ms.clamp(1, MAX_IDLE_MS) as u32);
    }
}
