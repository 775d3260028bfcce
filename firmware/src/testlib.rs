use edgetally_control::{Config, Counter};

use crate::system::clock::Clock;
use crate::system::hal::gpio::ExtiPin;
use crate::system::inputs::Inputs;
use crate::system::sensors::Sensor;

/// Block until the reset button gets clicked, i.e. pressed and released.
pub fn sample_until_button_is_clicked(inputs: &mut Inputs) {
    loop {
        inputs.sample();
        if inputs.button.clicked {
            break;
        }
        cortex_m::asm::delay(480_000_000 / 1000);
    }
}

/// Count edges of the sensor until the reset button gets clicked.
///
/// Interrupts are not unmasked in tests, pending edges are polled instead.
pub fn count_edges_until_button_is_clicked<P: ExtiPin>(
    clock: &Clock,
    inputs: &mut Inputs,
    sensor: &mut Sensor<P>,
) -> u32 {
    let counter = Counter::new(Config::DEFAULT);
    let channel = sensor.channel();
    sensor.acknowledge();
    loop {
        if sensor.pending() {
            sensor.acknowledge();
            if let Some(change) = counter.on_rising_edge(channel, clock.now()) {
                defmt::info!("Sensor {}: {} edges", channel, change.count);
            }
        }
        inputs.sample();
        if inputs.button.clicked {
            return counter.snapshot(channel).count;
        }
        // Pending edges latch in EXTI, none get lost while waiting.
        cortex_m::asm::delay(480_000_000 / 1000);
    }
}
