#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]
//! FIFO mode example for the LPS22CH barometer.
//!
//! This app targets the ESP32-S3 Matrix Board and demonstrates:
//! - Configuring the pressure FIFO with a watermark interrupt on INT.
//! - A button-driven capture cycle: bypass, fill, download, back to bypass.
//! - Draining every queued pressure / temperature sample after the interrupt.
//!
//! The flow is intentionally linear and verbose to serve as a reference
//! for integrating the driver in other embedded apps.

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer, with_timeout};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use ph_st_mems::{
    Error as BaroError,
    FifoInterrupt,
    FifoMode,
    Lps22chI2c,
    PressureAddress,
};
use {esp_backtrace as _, esp_println as _};

esp_bootloader_esp_idf::esp_app_desc!();

type BaroI2c = I2c<'static, esp_hal::Async>;
type BaroPin = Input<'static>;
type BaroDriver = Lps22chI2c<BaroI2c, BaroPin>;

defmt::timestamp!("{=u64:ms}", 0u64);

#[used]
static APP_DESC_REF: &esp_bootloader_esp_idf::EspAppDesc = &ESP_APP_DESC;

/// Friendly hardware identifier for logs.
const BOARD_NAME: &str = "ESP32-S3 Matrix Board";

/// Output data rate while filling the FIFO (10 Hz).
const SAMPLE_ODR_HZ_MILLI: u32 = 10_000;
/// Samples queued before the threshold interrupt fires.
const FIFO_WATERMARK: u8 = 5;
/// Depth of the LPS22CH FIFO.
const FIFO_MAX_SAMPLES: u8 = 128;
/// Period of the level check while waiting for INT.
const FIFO_POLL_DELAY_MS: u64 = 100;
/// Pause between "FIFO mode" announcement and the mode switch.
const FIFO_START_DELAY_MS: u64 = 1_000;
/// Delay between init retries.
const INIT_RETRY_DELAY_MS: u64 = 100;
/// Button debounce time.
const DEBOUNCE_DELAY_MS: u64 = 50;

/// Demo state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
enum DemoState {
    Idle,
    SetFifoMode,
    FifoRun,
    FifoDownload,
    SetBypass,
}

/// Bring the sensor up and program the FIFO for threshold capture.
async fn configure_baro(baro: &mut BaroDriver) -> Result<u8, BaroError> {
    let address = baro
        .init_with_addresses(&[
            PressureAddress::Primary.addr(),
            PressureAddress::Secondary.addr(),
        ])
        .await?;
    baro.set_pressure_output_data_rate(SAMPLE_ODR_HZ_MILLI).await?;
    baro.enable_pressure().await?;
    baro.enable_temperature().await?;

    // Clear any previously routed FIFO event before selecting the threshold.
    baro.reset_fifo_interrupt(FifoInterrupt::Threshold).await?;
    baro.reset_fifo_interrupt(FifoInterrupt::Full).await?;
    baro.set_fifo_stop_on_watermark(false).await?;

    baro.set_fifo_interrupt(FifoInterrupt::Threshold).await?;
    baro.set_fifo_watermark(FIFO_WATERMARK).await?;
    baro.set_fifo_stop_on_watermark(true).await?;
    Ok(address)
}

/// Pop and log every sample queued in the FIFO.
async fn read_all_fifo_data(baro: &mut BaroDriver) -> Result<(), BaroError> {
    let level = baro.fifo_level().await?;
    let count = level.min(FIFO_MAX_SAMPLES);
    info!("{} samples in FIFO", count);

    for index in 0..count {
        let sample = baro.read_fifo_sample().await?;
        info!(
            "sample {}: {} mhPa, {} mdegC",
            index + 1,
            sample.pressure.hpa_milli(),
            sample.temperature.mdegc()
        );
    }
    Ok(())
}

/// Run one state-machine step and return the next state.
async fn step(
    baro: &mut BaroDriver,
    button: &mut Input<'static>,
    state: DemoState,
    prev_level: &mut u8,
) -> Result<DemoState, BaroError> {
    match state {
        DemoState::Idle => {
            button.wait_for_falling_edge().await;
            Timer::after(Duration::from_millis(DEBOUNCE_DELAY_MS)).await;
            button.wait_for_high().await;
            Timer::after(Duration::from_millis(DEBOUNCE_DELAY_MS)).await;
            Ok(DemoState::SetFifoMode)
        }
        DemoState::SetFifoMode => {
            info!(
                "FIFO threshold interrupt, watermark {}, {} Hz",
                FIFO_WATERMARK,
                SAMPLE_ODR_HZ_MILLI / 1_000
            );
            info!("LPS22CH starts to store data into FIFO...");
            Timer::after(Duration::from_millis(FIFO_START_DELAY_MS)).await;
            baro.set_fifo_mode(FifoMode::Fifo).await?;
            Ok(DemoState::FifoRun)
        }
        DemoState::FifoRun => {
            let level = baro.fifo_level().await?;
            if level != *prev_level {
                *prev_level = level;
                info!("FIFO level {}", level);
            }
            let poll = Duration::from_millis(FIFO_POLL_DELAY_MS);
            match with_timeout(poll, baro.wait_int_high()).await {
                Ok(Ok(())) => Ok(DemoState::FifoDownload),
                Ok(Err(_)) => {
                    warn!("INT pin unavailable");
                    Ok(DemoState::FifoRun)
                }
                Err(_) => Ok(DemoState::FifoRun),
            }
        }
        DemoState::FifoDownload => {
            // INT and FIFO_STATUS must agree before the download.
            if baro.fifo_watermark_reached().await? {
                read_all_fifo_data(baro).await?;
                Ok(DemoState::SetBypass)
            } else {
                Ok(DemoState::FifoDownload)
            }
        }
        DemoState::SetBypass => {
            baro.set_fifo_mode(FifoMode::Bypass).await?;
            *prev_level = 0;
            info!("Press the BOOT button to start the demo...");
            Ok(DemoState::Idle)
        }
    }
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    // Bring up clocks and timers early so delays are reliable.
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Barometer INT (push-pull, active high) and the BOOT button.
    let int = Input::new(peripherals.GPIO10, InputConfig::default().with_pull(Pull::Down));
    let mut button = Input::new(peripherals.GPIO0, InputConfig::default().with_pull(Pull::Up));

    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let i2c = I2c::new(peripherals.I2C0, i2c_config)
        .unwrap()
        .with_sda(peripherals.GPIO11)
        .with_scl(peripherals.GPIO12)
        .into_async();

    let mut baro: BaroDriver = Lps22chI2c::new_i2c(i2c, Some(int));

    let address = loop {
        match configure_baro(&mut baro).await {
            Ok(address) => break address,
            Err(BaroError::NotPresent | BaroError::Bus) => {
                warn!("LPS22CH not answering, retrying...");
                Timer::after(Duration::from_millis(INIT_RETRY_DELAY_MS)).await;
            }
            Err(err) => {
                error!("LPS22CH init failed: {}", err);
                loop {
                    Timer::after(Duration::from_secs(1)).await;
                }
            }
        }
    };
    info!("LPS22CH init ok @0x{:02x}", address);
    info!("------ LPS22CH FIFO mode demo ({}) ------", BOARD_NAME);

    let mut state = DemoState::SetBypass;
    let mut prev_level = 0u8;

    loop {
        state = match step(&mut baro, &mut button, state, &mut prev_level).await {
            Ok(next) => next,
            Err(err) => {
                error!("{} failed: {}", state, err);
                Timer::after(Duration::from_millis(INIT_RETRY_DELAY_MS)).await;
                DemoState::SetBypass
            }
        };
    }
}
