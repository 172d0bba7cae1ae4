use log::LevelFilter;
use steerbot::drivers::motor::pwm_motor::MAX_PERIOD;

pub const SYSCLK_HZ: u32 = 48_000_000;
pub const USART_BAUD: u32 = 115_200;
pub const ACCEL_SPI_FREQ_HZ: u32 = 2_000_000;

// A line at USART_BAUD takes a few ms to send and blocks the task that logs
// it. Debug adds a line per wheel to every maneuver step.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

// PWM cores sit behind the FMC, one 0x20 window per core.
// Bus setup for this window happens in the board support code.
pub const PWM_BASE: usize = 0x6000_0000;
pub const PWM_WINDOW: usize = 0x20;

// front-left, front-right, back-left, back-right
pub const SPEED_PWM_ADDRESSES: [usize; 4] = [
    PWM_BASE,
    PWM_BASE + PWM_WINDOW,
    PWM_BASE + 2 * PWM_WINDOW,
    PWM_BASE + 3 * PWM_WINDOW,
];
pub const DIRECTION_PWM_ADDRESSES: [usize; 4] = [
    PWM_BASE + 4 * PWM_WINDOW,
    PWM_BASE + 5 * PWM_WINDOW,
    PWM_BASE + 6 * PWM_WINDOW,
    PWM_BASE + 7 * PWM_WINDOW,
];

// counts per PWM period, duty values are fractions of this
pub const PWM_PERIOD: u32 = 100_000;
const _: () = assert!(PWM_PERIOD <= MAX_PERIOD);
