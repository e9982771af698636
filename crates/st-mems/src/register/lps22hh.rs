//! LPS22HH-family register map (LPS22CH, LPS27HHTW).

/// LPS22HH-family register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Pressure threshold interrupt configuration.
    InterruptCfg = 0x0B,
    /// Pressure threshold low byte.
    ThsPL = 0x0C,
    /// Pressure threshold high byte.
    ThsPH = 0x0D,
    /// Serial interface control.
    IfCtrl = 0x0E,
    /// Device identifier register.
    WhoAmI = 0x0F,
    /// Control register 1 (ODR, LPF, BDU, SIM).
    CtrlReg1 = 0x10,
    /// Control register 2 (one-shot, low noise, reset, pin config).
    CtrlReg2 = 0x11,
    /// Control register 3 (interrupt routing).
    CtrlReg3 = 0x12,
    /// FIFO control.
    FifoCtrl = 0x13,
    /// FIFO watermark.
    FifoWtm = 0x14,
    /// Reference pressure low byte.
    RefPL = 0x15,
    /// Reference pressure high byte.
    RefPH = 0x16,
    /// Pressure offset low byte.
    RpdsL = 0x18,
    /// Pressure offset high byte.
    RpdsH = 0x19,
    /// Interrupt source.
    IntSource = 0x24,
    /// FIFO fill level.
    FifoStatus1 = 0x25,
    /// FIFO flags.
    FifoStatus2 = 0x26,
    /// Data status.
    Status = 0x27,
    /// Pressure output extra-low byte.
    PressOutXl = 0x28,
    /// Pressure output low byte.
    PressOutL = 0x29,
    /// Pressure output high byte.
    PressOutH = 0x2A,
    /// Temperature output low byte.
    TempOutL = 0x2B,
    /// Temperature output high byte.
    TempOutH = 0x2C,
    /// FIFO pressure output extra-low byte.
    FifoDataOutPressXl = 0x78,
    /// FIFO pressure output low byte.
    FifoDataOutPressL = 0x79,
    /// FIFO pressure output high byte.
    FifoDataOutPressH = 0x7A,
    /// FIFO temperature output low byte.
    FifoDataOutTempL = 0x7B,
    /// FIFO temperature output high byte.
    FifoDataOutTempH = 0x7C,
}

super::impl_register_address!(Register);

/// Expected values for WHO_AM_I.
pub mod who_am_i {
    /// Expected WHO_AM_I register value.
    pub const EXPECTED: u8 = 0xB3;
}

/// IF_CTRL register bits.
pub mod if_ctrl {
    /// Disable I2C.
    pub const I2C_DISABLE: u8 = 0b0000_0001;
    /// Disable MIPI I3C.
    pub const I3C_DISABLE: u8 = 0b0000_0010;
    /// INT pin driven as output with I3C.
    pub const INT_EN_I3C: u8 = 0b1000_0000;
}

/// CTRL_REG1 register bits.
pub mod ctrl_reg1 {
    /// SPI 3-wire mode.
    pub const SIM: u8 = 0b0000_0001;
    /// Block data update.
    pub const BDU: u8 = 0b0000_0010;
    /// Low-pass filter configuration mask (EN_LPFP + LPFP_CFG).
    pub const LPFP_MASK: u8 = 0b0000_1100;
    /// Low-pass filter configuration shift.
    pub const LPFP_SHIFT: u8 = 2;
    /// Output data rate mask.
    pub const ODR_MASK: u8 = 0b0111_0000;
    /// Output data rate shift.
    pub const ODR_SHIFT: u8 = 4;
}

/// CTRL_REG2 register bits.
pub mod ctrl_reg2 {
    /// One-shot trigger.
    pub const ONE_SHOT: u8 = 0b0000_0001;
    /// Low-noise mode.
    pub const LOW_NOISE_EN: u8 = 0b0000_0010;
    /// Software reset.
    pub const SWRESET: u8 = 0b0000_0100;
    /// Register address auto-increment.
    pub const IF_ADD_INC: u8 = 0b0001_0000;
    /// Push-pull (0) / open-drain (1) INT pin.
    pub const PP_OD: u8 = 0b0010_0000;
    /// INT pin active low.
    pub const INT_H_L: u8 = 0b0100_0000;
    /// Reboot memory content.
    pub const BOOT: u8 = 0b1000_0000;
}

/// CTRL_REG3 register bits.
pub mod ctrl_reg3 {
    /// INT signal selection mask.
    pub const INT_S_MASK: u8 = 0b0000_0011;
    /// Data-ready on INT.
    pub const DRDY: u8 = 0b0000_0100;
    /// FIFO overrun on INT.
    pub const INT_F_OVR: u8 = 0b0000_1000;
    /// FIFO watermark on INT.
    pub const INT_F_WTM: u8 = 0b0001_0000;
    /// FIFO full on INT.
    pub const INT_F_FULL: u8 = 0b0010_0000;
}

/// FIFO_CTRL register bits.
pub mod fifo_ctrl {
    /// FIFO mode (including TRIG_MODES) mask.
    pub const MODE_MASK: u8 = 0b0000_0111;
    /// Stop filling at watermark.
    pub const STOP_ON_WTM: u8 = 0b0000_1000;
}

/// FIFO_WTM register bits.
pub mod fifo_wtm {
    /// Watermark level mask.
    pub const WTM_MASK: u8 = 0b0111_1111;
}

/// FIFO_STATUS2 register bits.
pub mod fifo_status2 {
    /// FIFO full.
    pub const FULL: u8 = 0b0010_0000;
    /// FIFO overrun.
    pub const OVR: u8 = 0b0100_0000;
    /// FIFO watermark reached.
    pub const WTM: u8 = 0b1000_0000;
}

/// STATUS register bits.
pub mod status {
    /// Pressure data available.
    pub const P_DA: u8 = 0b0000_0001;
    /// Temperature data available.
    pub const T_DA: u8 = 0b0000_0010;
    /// Pressure data overrun.
    pub const P_OR: u8 = 0b0001_0000;
    /// Temperature data overrun.
    pub const T_OR: u8 = 0b0010_0000;
}
