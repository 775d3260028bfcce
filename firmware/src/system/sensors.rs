//! Sensor lines triggering interrupts on rising edges.
//!
//! Each sensor gets its own EXTI line, and each of the lines must be served
//! by a different interrupt vector, so both can be handled independently.

use edgetally_control::Channel;

use super::hal::gpio::{self, Edge, ExtiPin, PinExt};
use super::hal::pac::{EXTI, SYSCFG};

/// Served by `EXTI9_5`.
pub type SensorAPin = gpio::gpiob::PB8<gpio::Input>;
/// Served by `EXTI15_10`.
pub type SensorBPin = gpio::gpiog::PG13<gpio::Input>;

pub struct Config {
    pub sensor_a: SensorAPin,
    pub sensor_b: SensorBPin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum InitError {
    /// Pins with the same number share an EXTI line and could not be told
    /// apart.
    SharedLine(u8),
}

pub struct Sensors {
    pub a: Sensor<SensorAPin>,
    pub b: Sensor<SensorBPin>,
}

impl Sensors {
    /// Configure both sensor pins to raise an interrupt on rising edge.
    ///
    /// # Errors
    ///
    /// Fails with `InitError::SharedLine` when both pins map to the same EXTI
    /// line. No interrupt is enabled in that case.
    pub fn new(config: Config, syscfg: &mut SYSCFG, exti: &mut EXTI) -> Result<Self, InitError> {
        check_lines(config.sensor_a.pin_id(), config.sensor_b.pin_id())?;

        Ok(Self {
            a: Sensor::new(Channel::A, config.sensor_a, syscfg, exti),
            b: Sensor::new(Channel::B, config.sensor_b, syscfg, exti),
        })
    }
}

/// Make sure the two sensors can be served by separate EXTI lines.
///
/// With the current pin assignment of PB8 and PG13 this always passes. It
/// guards reassignments of sensor pins, e.g. for another board revision,
/// since pins sharing a number would share the line too.
///
/// # Errors
///
/// Fails with `InitError::SharedLine` when both lines are the same.
pub fn check_lines(line_a: u8, line_b: u8) -> Result<(), InitError> {
    if line_a == line_b {
        return Err(InitError::SharedLine(line_a));
    }
    Ok(())
}

pub struct Sensor<P> {
    channel: Channel,
    pin: P,
}

impl<P: ExtiPin> Sensor<P> {
    fn new(channel: Channel, mut pin: P, syscfg: &mut SYSCFG, exti: &mut EXTI) -> Self {
        pin.make_interrupt_source(syscfg);
        pin.trigger_on_edge(exti, Edge::Rising);
        pin.enable_interrupt(exti);
        defmt::info!("Sensor {} armed", channel);
        Self { channel, pin }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Whether an edge was observed and not acknowledged yet.
    pub fn pending(&self) -> bool {
        self.pin.check_interrupt()
    }

    /// Clear the pending edge, must be called from the interrupt handler.
    pub fn acknowledge(&mut self) {
        self.pin.clear_interrupt_pending_bit();
    }
}
