pub mod clock;
pub mod inputs;
pub mod outputs;
pub mod sensors;

pub use daisy::hal;

use daisy::led::LedUser;
use hal::pac::CorePeripherals;
use hal::pac::Peripherals as DevicePeripherals;
use systick_monotonic::Systick;

use clock::Clock;
use inputs::{Config as InputsConfig, Inputs};
use outputs::{Config as OutputsConfig, LedsPins, Outputs};
use sensors::{Config as SensorsConfig, InitError, Sensors};

pub struct System {
    pub mono: Systick<1000>,
    pub status_led: LedUser,
    pub clock: Clock,
    pub inputs: Inputs,
    pub outputs: Outputs,
    /// Edge source. Its failure is not fatal, the rest of the system keeps
    /// running to report it.
    pub sensors: Result<Sensors, InitError>,
}

impl System {
    /// Initialize system abstraction
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise.
    #[must_use]
    pub fn init(mut cp: CorePeripherals, dp: DevicePeripherals) -> Self {
        enable_cache(&mut cp);

        let board = daisy::Board::take().unwrap();
        let ccdr = daisy::board_freeze_clocks!(board, dp);
        let pins = daisy::board_split_gpios!(board, ccdr, dp);

        let mono = Systick::new(cp.SYST, 480_000_000);
        let status_led = daisy::board_split_leds!(pins).USER;
        let clock = Clock::new(dp.TIM2, ccdr.peripheral.TIM2, &ccdr.clocks);

        let inputs = Inputs::new(InputsConfig {
            button: pins.GPIO.PIN_B9.into_pull_up_input(),
        });

        let outputs = Outputs::new(OutputsConfig {
            leds: LedsPins {
                display: (
                    pins.GPIO.PIN_D1.into_push_pull_output(),
                    pins.GPIO.PIN_D2.into_push_pull_output(),
                    pins.GPIO.PIN_D3.into_push_pull_output(),
                    pins.GPIO.PIN_D4.into_push_pull_output(),
                    pins.GPIO.PIN_D7.into_push_pull_output(),
                    pins.GPIO.PIN_D8.into_push_pull_output(),
                    pins.GPIO.PIN_D9.into_push_pull_output(),
                    pins.GPIO.PIN_D10.into_push_pull_output(),
                ),
            },
        });

        let mut syscfg = dp.SYSCFG;
        let mut exti = dp.EXTI;
        let sensors = Sensors::new(
            SensorsConfig {
                // Sensors drive the line high, keep it low when disconnected.
                sensor_a: pins.GPIO.PIN_B7.into_pull_down_input(),
                sensor_b: pins.GPIO.PIN_B10.into_pull_down_input(),
            },
            &mut syscfg,
            &mut exti,
        );

        Self {
            mono,
            status_led,
            clock,
            inputs,
            outputs,
            sensors,
        }
    }
}

/// AN5212: Improve application performance when fetching instruction and
/// data, from both internal andexternal memories.
fn enable_cache(cp: &mut CorePeripherals) {
    cp.SCB.enable_icache();
    // NOTE: This requires cache management around all use of DMA.
    cp.SCB.enable_dcache(&mut cp.CPUID);
}
