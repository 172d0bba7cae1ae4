use core::cell::RefCell;
use core::fmt::Write;
use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use stm32f4xx_hal::{pac::USART2, serial::Tx};

// Writes log records to the serial port, one line per record.
//
// The port is checked out of the critical section for the length of a line,
// so interrupts stay enabled while it is transmitting. A record logged while
// another task holds the port is dropped and counted.
pub struct SerialLogger {
    tx: Mutex<RefCell<Option<Tx<USART2>>>>,
    dropped: AtomicU32,
}

static LOGGER: SerialLogger = SerialLogger {
    tx: Mutex::new(RefCell::new(None)),
    dropped: AtomicU32::new(0),
};

pub fn init(tx: Tx<USART2>, level: LevelFilter) -> Result<(), SetLoggerError> {
    interrupt::free(|cs| LOGGER.tx.borrow(cs).replace(Some(tx)));
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let tx = interrupt::free(|cs| self.tx.borrow(cs).borrow_mut().take());
        let mut tx = match tx {
            Some(tx) => tx,
            None => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            let _ = write!(tx, "[WARN] logger: {} records dropped\r\n", dropped);
        }
        let _ = write!(
            tx,
            "[{}] {}: {}\r\n",
            record.level(),
            record.target(),
            record.args()
        );

        interrupt::free(|cs| self.tx.borrow(cs).replace(Some(tx)));
    }

    fn flush(&self) {}
}
