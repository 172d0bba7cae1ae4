// ADXL345 Registers and Configs
// Datasheet: https://www.analog.com/media/en/technical-documentation/data-sheets/ADXL345.pdf

pub const ADXL345_DEVID: u8 = 0xE5;

// SPI command bits, OR'd into the register address
pub const SPI_READ: u8 = 0x80;
pub const SPI_MULTI_BYTE: u8 = 0x40;

// number of bytes in one (x, y, z) sample
pub const RAW_DATA_NUM_BYTES: usize = 6;

#[repr(u8)]
pub enum RegAddr {
    DevId = 0x00,
    BwRate = 0x2C,
    PowerCtl = 0x2D,
    IntEnable = 0x2E,
    IntSource = 0x30,
    DataFormat = 0x31,
    DataX0 = 0x32,
}

// BW_RATE register:
// Bits:     | 7:5 |     4     |  3:0 |
// Function |  0  | LOW_POWER | RATE |
#[repr(u8)]
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum OutputDataRate {
    Hz100 = 0x0A,
    Hz200 = 0x0B,
    Hz400 = 0x0C,
    Hz800 = 0x0D,
    Hz1600 = 0x0E,
    Hz3200 = 0x0F,
}

// POWER_CTL register:
// Bits:     | 7:6 |  5   |     4      |    3    |   2   | 1:0    |
// Function: |  0  | LINK | AUTO_SLEEP | MEASURE | SLEEP | WAKEUP |
#[repr(u8)]
#[allow(dead_code)]
pub enum PowerCtlBits {
    Sleep = 0x01 << 2,
    Measure = 0x01 << 3,
}

// INT_ENABLE / INT_SOURCE registers share this layout
#[repr(u8)]
#[allow(dead_code)]
pub enum IntBits {
    Overrun = 0x01 << 0,
    Watermark = 0x01 << 1,
    DataReady = 0x01 << 7,
}

// DATA_FORMAT register:
// Bits:     |    7      |  6  |     5      | 4 |    3     |    2    |  1:0  |
// Function: | SELF_TEST | SPI | INT_INVERT | 0 | FULL_RES | JUSTIFY | RANGE |
#[repr(u8)]
#[allow(dead_code)]
pub enum DataFormatBits {
    FullRes = 0x01 << 3,
}

#[repr(u8)]
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Range {
    Gpm2 = 0x00,
    Gpm4 = 0x01,
    Gpm8 = 0x02,
    Gpm16 = 0x03,
}
