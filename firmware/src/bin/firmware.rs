#![no_main]
#![no_std]

use edgetally_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = stm32h7xx_hal::pac, peripherals = true, dispatchers = [EXTI0, EXTI1])]
mod app {
    use core::sync::atomic::{AtomicBool, Ordering};

    use daisy::led::{Led, LedUser};
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use edgetally_control::{
        Channel, Config, Counter, Display, Inbox, Mailbox, Outbox, PostError, StepChanged,
    };
    use edgetally_firmware::system::clock::Clock;
    use edgetally_firmware::system::inputs::Inputs;
    use edgetally_firmware::system::outputs::Outputs;
    use edgetally_firmware::system::sensors::{Sensor, SensorAPin, SensorBPin};
    use edgetally_firmware::system::System;

    const BLINKS: u8 = 1;

    // Each channel can hold 7 changes, more than enough for a 1 ms control loop.
    const MAILBOX_SIZE: usize = 8;

    // Shared between both sensor interrupts and the control loop. Channels
    // are kept in atomics, so no locking is needed.
    static COUNTER: Counter = Counter::new(Config::DEFAULT);

    // Raised by a sensor interrupt when its outbox overflowed.
    static OVERFLOWED: AtomicBool = AtomicBool::new(false);

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {
        // Only read by the sensor interrupts running on the same priority.
        #[lock_free]
        clock: Clock,
    }

    #[local]
    struct Local {
        status_led: LedUser,
        inputs: Inputs,
        outputs: Outputs,
        display: Display,
        inbox: Inbox<'static, MAILBOX_SIZE>,
        sensor_a: Option<Sensor<SensorAPin>>,
        sensor_b: Option<Sensor<SensorBPin>>,
        outbox_a: Outbox<'static, MAILBOX_SIZE>,
        outbox_b: Outbox<'static, MAILBOX_SIZE>,
    }

    #[init(local = [mailbox: Mailbox<MAILBOX_SIZE> = Mailbox::new()])]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let status_led = system.status_led;
        let clock = system.clock;
        let inputs = system.inputs;
        let outputs = system.outputs;

        let (outbox_a, outbox_b, inbox) = cx.local.mailbox.split();

        let mut display = Display::default();
        let (sensor_a, sensor_b) = match system.sensors {
            Ok(sensors) => (Some(sensors.a), Some(sensors.b)),
            Err(error) => {
                defmt::error!("Edge source initialization failed: {}", error);
                display.fail();
                (None, None)
            }
        };
        for channel in Channel::ALL {
            defmt::info!("{}", display.label(channel).as_str());
        }

        control::spawn().unwrap();
        blink::spawn(true, BLINKS).unwrap();

        (
            Shared { clock },
            Local {
                status_led,
                inputs,
                outputs,
                display,
                inbox,
                sensor_a,
                sensor_b,
                outbox_a,
                outbox_b,
            },
            init::Monotonics(mono),
        )
    }

    #[task(binds = EXTI9_5, local = [sensor_a, outbox_a], shared = [clock], priority = 2)]
    fn edge_a(cx: edge_a::Context) {
        let tick = cx.shared.clock.now();
        if let Some(sensor) = cx.local.sensor_a {
            sensor.acknowledge();
        }
        if let Some(change) = COUNTER.on_rising_edge(Channel::A, tick) {
            post(cx.local.outbox_a, change);
        }
    }

    #[task(binds = EXTI15_10, local = [sensor_b, outbox_b], shared = [clock], priority = 2)]
    fn edge_b(cx: edge_b::Context) {
        let tick = cx.shared.clock.now();
        if let Some(sensor) = cx.local.sensor_b {
            sensor.acknowledge();
        }
        if let Some(change) = COUNTER.on_rising_edge(Channel::B, tick) {
            post(cx.local.outbox_b, change);
        }
    }

    fn post(outbox: &mut Outbox<'static, MAILBOX_SIZE>, change: StepChanged) {
        match outbox.post(change) {
            Ok(()) => (),
            Err(PostError::Full(_)) => OVERFLOWED.store(true, Ordering::Relaxed),
            Err(PostError::WrongChannel(change)) => {
                defmt::error!("Change {} posted to outbox {}", change, outbox.channel());
            }
        }
    }

    #[task(local = [inputs, outputs, display, inbox], priority = 1)]
    fn control(cx: control::Context) {
        control::spawn_after(1.millis()).unwrap();

        let inputs = cx.local.inputs;
        let outputs = cx.local.outputs;
        let display = cx.local.display;
        let inbox = cx.local.inbox;

        inputs.sample();
        if inputs.button.clicked {
            COUNTER.reset();
            inbox.discard();
            OVERFLOWED.store(false, Ordering::Relaxed);
            display.reset();
            // An edge may have been accepted and its change discarded since
            // the counter was reset.
            display.resync(&COUNTER);
            for channel in Channel::ALL {
                defmt::info!("{}", display.label(channel).as_str());
            }
        }

        while let Some(change) = inbox.receive() {
            display.apply(change);
            defmt::info!("{}", display.label(change.channel).as_str());
        }

        if OVERFLOWED.swap(false, Ordering::Relaxed) {
            defmt::warn!("Notifications were lost, syncing with the counter");
            display.resync(&COUNTER);
        }

        display.tick();
        outputs.set(display.leds());
    }

    #[task(local = [status_led])]
    fn blink(cx: blink::Context, on: bool, blinks: u8) {
        let time_on = 200.millis();
        let time_off_short = 200.millis();
        let time_off_long = 2.secs();

        if on {
            cx.local.status_led.on();
            blink::spawn_after(time_on, false, blinks).unwrap();
        } else {
            cx.local.status_led.off();
            if blinks > 1 {
                blink::spawn_after(time_off_short, true, blinks - 1).unwrap();
            } else {
                blink::spawn_after(time_off_long, true, BLINKS).unwrap();
            }
        }
    }
}
