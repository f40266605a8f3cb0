//! Pump output task
//!
//! Owns the six pump drivers and applies output commands from the
//! controller. Only level changes touch the pins.

use defmt::*;

use antlia_core::sequence::PUMP_COUNT;
use antlia_core::traits::PumpOutput;
use antlia_drivers::pump::gpio::OutputPin;
use antlia_drivers::GpioPump;
use embassy_rp::gpio::Output;

use crate::channels::PUMP_CMD;

/// Adapter so embassy's GPIO output satisfies the driver's pin trait
pub struct PumpPin(pub Output<'static>);

impl OutputPin for PumpPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// The six pump drivers, indexed by pump number
pub type PumpBank = [GpioPump<PumpPin>; PUMP_COUNT];

/// Pump task - applies controller output commands to the drivers
#[embassy_executor::task]
pub async fn pumps_task(mut pumps: PumpBank) {
    info!("Pump task started");

    loop {
        let command = PUMP_CMD.wait().await;
        for (index, (pump, &on)) in pumps.iter_mut().zip(command.iter()).enumerate() {
            if pump.is_on() != on {
                debug!("Pump {}: {}", index + 1, on);
                pump.set_on(on);
            }
        }
    }
}
