#![no_main]
#![no_std]

mod config;
mod logger;
mod maneuver;
mod sensor;
mod stabilizer;

use panic_halt as _;
use steerbot::tasks::schedule;

// RTIC wants literal priorities in the task attributes below
const _: () = assert!(schedule::STABILIZER_PRIORITY == 3);
const _: () = assert!(schedule::MANEUVER_PRIORITY == 2);
const _: () = assert!(schedule::SENSOR_PRIORITY == 1);

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI2, SPI3, USART1])]
mod app {
    use crate::config::{sys_config, tuning};
    use crate::logger;
    use crate::maneuver::maneuver_task;
    use crate::sensor::sensor_task;
    use crate::stabilizer::stabilizer_task;
    use cortex_m::asm;
    use rtic_core::Exclusive;
    use steerbot::controller::vehicle::{VehicleController, Wheel};
    use steerbot::drivers::accel::adxl345;
    use steerbot::drivers::pwm::pwm_core::MmioPwm;
    use steerbot::navigation::ins::Ins;
    use steerbot::tasks::maneuver::ManeuverSequencer;
    use steerbot::tasks::sensor::SensorTask;
    use stm32f4xx_hal::{
        gpio::{Alternate, Output, Pin, PushPull, PB3, PB4, PB5},
        pac::{SPI1, TIM2, TIM5},
        prelude::*,
        serial::{Config, Serial},
        spi::{Mode, Phase, Polarity, Spi},
        timer::DelayMs,
    };
    use systick_monotonic::{fugit::Duration, Systick};

    type Accel = adxl345::ADXL345<
        Spi<SPI1, (PB3<Alternate<5>>, PB4<Alternate<5>>, PB5<Alternate<5>>)>,
        Pin<'A', 4, Output<PushPull>>,
    >;

    #[shared]
    struct Shared {
        vehicle: VehicleController<MmioPwm>,
        ins: Ins<Accel>,
    }

    #[local]
    struct Local {
        sequencer: ManeuverSequencer<'static>,
        sensor_state: SensorTask,
        stabilizer_delay: DelayMs<TIM2>,
        sensor_delay: DelayMs<TIM5>,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        // configure clocks
        let rcc = ctx.device.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, sys_config::SYSCLK_HZ);
        let clocks = rcc.cfgr.sysclk(sys_config::SYSCLK_HZ.Hz()).freeze();

        // set up uart tx and route the log output to it
        let gpioa = ctx.device.GPIOA.split();
        let tx_pin = gpioa.pa2.into_alternate();
        let tx = Serial::tx(
            ctx.device.USART2,
            tx_pin,
            Config::default()
                .baudrate(sys_config::USART_BAUD.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        logger::init(tx, sys_config::LOG_LEVEL).unwrap();

        // speed motors first, then steering, both front-left to back-right
        let mut addresses = sys_config::SPEED_PWM_ADDRESSES
            .iter()
            .chain(sys_config::DIRECTION_PWM_ADDRESSES.iter());
        let pwms: [MmioPwm; 8] = core::array::from_fn(|_| {
            let address = *addresses.next().unwrap();
            // Safety: each address is a distinct PWM core window owned by this firmware
            unsafe { MmioPwm::new(address) }
        });
        let mut vehicle = VehicleController::new(pwms, sys_config::PWM_PERIOD);
        for wheel in Wheel::ALL {
            vehicle
                .steering_mut(wheel)
                .set_realign_dwell_ms(tuning::REALIGN_DWELL_MS);
        }

        // configure accelerometer spi and cs, the ADXL345 wants mode 3
        let gpiob = ctx.device.GPIOB.split();
        let mut accel_cs = gpioa.pa4.into_push_pull_output();
        accel_cs.set_high();
        let accel_sclk = gpiob.pb3.into_alternate();
        let accel_mosi = gpiob.pb5.into_alternate();
        let accel_miso = gpiob.pb4.into_alternate();
        let accel_spi = Spi::new(
            ctx.device.SPI1,
            (accel_sclk, accel_miso, accel_mosi),
            Mode {
                polarity: Polarity::IdleHigh,
                phase: Phase::CaptureOnSecondTransition,
            },
            sys_config::ACCEL_SPI_FREQ_HZ.Hz(),
            &clocks,
        );

        let mut accel = adxl345::ADXL345::new(accel_spi, accel_cs);
        match accel.init(adxl345::OutputDataRate::Hz1600, adxl345::Range::Gpm16) {
            Ok(_) => log::info!("accelerometer initialized"),
            Err(e) => {
                match e {
                    adxl345::ErrorCode::SpiError => log::error!("accelerometer SPI error"),
                    adxl345::ErrorCode::CSError => log::error!("accelerometer CS error"),
                    adxl345::ErrorCode::WrongID => log::error!("accelerometer wrong ID"),
                }
                panic!("accelerometer initialization failed");
            }
        }
        let ins = Ins::new(accel);

        // blocking delays for the realign dwell and the data-ready polling
        let stabilizer_delay = ctx.device.TIM2.delay_ms(&clocks);
        let sensor_delay = ctx.device.TIM5.delay_ms(&clocks);

        let mut sequencer =
            match ManeuverSequencer::new(tuning::MANEUVER_SETUP, &tuning::MANEUVER_PROGRAM) {
                Ok(sequencer) => sequencer,
                Err(e) => panic!("invalid maneuver program: {:?}", e),
            };
        if let Err(e) = sequencer.start(&mut Exclusive(&mut vehicle)) {
            panic!("maneuver setup failed: {:?}", e);
        }

        log::info!("system initialized");

        stabilizer_task::spawn().unwrap();
        maneuver_task::spawn().unwrap();
        sensor_task::spawn_after(Duration::<u64, 1, 1000>::millis(1)).unwrap();

        (
            Shared { vehicle, ins },
            Local {
                sequencer,
                sensor_state: SensorTask::new(),
                stabilizer_delay,
                sensor_delay,
            },
            init::Monotonics(mono),
        )
    }

    extern "Rust" {
        #[task(shared = [vehicle], local = [stabilizer_delay], priority = 3)]
        fn stabilizer_task(cx: stabilizer_task::Context);

        #[task(shared = [vehicle], local = [sequencer], priority = 2)]
        fn maneuver_task(cx: maneuver_task::Context);

        #[task(shared = [ins], local = [sensor_state, sensor_delay], priority = 1)]
        fn sensor_task(cx: sensor_task::Context);
    }

    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }
}
