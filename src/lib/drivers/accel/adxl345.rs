// ADXL345 accelerometer driver, SPI 4-wire
// Datasheet: https://www.analog.com/media/en/technical-documentation/data-sheets/ADXL345.pdf

pub use crate::drivers::accel::adxl345_constants::*;

use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::OutputPin;

use crate::drivers::accel::accelerometer::Accelerometer;

// Error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    SpiError,
    CSError,
    WrongID,
}

struct SpiWrapper<SPI, CS> {
    spi_bus: SPI,
    cs: CS,
}

impl<SPI, CS> SpiWrapper<SPI, CS>
where
    SPI: Write<u8> + Transfer<u8>,
    CS: OutputPin,
{
    // first byte of data is the command, the returned slice skips it
    fn transfer<'a>(&mut self, data: &'a mut [u8]) -> Result<&'a [u8], ErrorCode> {
        if self.cs.set_low().is_err() {
            return Err(ErrorCode::CSError);
        }
        let res = self.spi_bus.transfer(data);
        if self.cs.set_high().is_err() {
            return Err(ErrorCode::CSError);
        }
        match res {
            Ok(read_data) => Ok(&read_data[1..]),
            Err(_) => Err(ErrorCode::SpiError),
        }
    }
}

pub struct ADXL345<SPI, CS> {
    spi: SpiWrapper<SPI, CS>,
}

impl<SPI, CS> ADXL345<SPI, CS>
where
    SPI: Write<u8> + Transfer<u8>,
    CS: OutputPin,
{
    pub fn new(spi_bus: SPI, cs: CS) -> Self {
        Self {
            spi: SpiWrapper { spi_bus, cs },
        }
    }

    /// Check the device id and start measuring.
    pub fn init(&mut self, rate: OutputDataRate, range: Range) -> Result<(), ErrorCode> {
        self.check_id()?;
        self.write_byte(
            RegAddr::DataFormat as u8,
            DataFormatBits::FullRes as u8 | range as u8,
        )?;
        self.write_byte(RegAddr::BwRate as u8, rate as u8)?;
        self.write_byte(RegAddr::IntEnable as u8, IntBits::DataReady as u8)?;
        // measurement mode last, the part idles in standby until then
        self.write_byte(RegAddr::PowerCtl as u8, PowerCtlBits::Measure as u8)?;
        log::info!("ADXL345 measuring at rate code {:#04x}", rate as u8);
        Ok(())
    }

    pub fn data_ready(&mut self) -> Result<bool, ErrorCode> {
        let int_source = self.read_byte(RegAddr::IntSource as u8)?;
        Ok((int_source & IntBits::DataReady as u8) != 0)
    }

    // Reads all six data registers in one burst so the axes come from the same sample
    pub fn read_data(&mut self) -> Result<[i16; 3], ErrorCode> {
        let mut bytes: [u8; RAW_DATA_NUM_BYTES + 1] = [0; RAW_DATA_NUM_BYTES + 1];
        bytes[0] = RegAddr::DataX0 as u8 | SPI_MULTI_BYTE;
        let buf = self.read_bytes(&mut bytes[..])?;
        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    fn check_id(&mut self) -> Result<(), ErrorCode> {
        let dev_id = self.read_byte(RegAddr::DevId as u8)?;
        if dev_id != ADXL345_DEVID {
            log::error!("ADXL345 reported device id {:#04x}", dev_id);
            Err(ErrorCode::WrongID)
        } else {
            Ok(())
        }
    }

    fn write_byte(&mut self, reg: u8, data: u8) -> Result<(), ErrorCode> {
        let mut bytes = [reg, data];
        self.spi.transfer(&mut bytes[..])?;
        Ok(())
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, ErrorCode> {
        let mut bytes = [reg | SPI_READ, 0];
        let data = self.spi.transfer(&mut bytes[..])?;
        Ok(data[0])
    }

    fn read_bytes<'a>(&mut self, data: &'a mut [u8]) -> Result<&'a [u8], ErrorCode> {
        data[0] |= SPI_READ;
        self.spi.transfer(data)
    }
}

impl<SPI, CS> Accelerometer for ADXL345<SPI, CS>
where
    SPI: Write<u8> + Transfer<u8>,
    CS: OutputPin,
{
    type Error = ErrorCode;

    fn is_data_ready(&mut self) -> Result<bool, ErrorCode> {
        self.data_ready()
    }

    fn read_xyz(&mut self) -> Result<[i16; 3], ErrorCode> {
        self.read_data()
    }
}
