//! LPS33-family register map (LPS33HW, LPS33K).

/// LPS33-family register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Pressure threshold interrupt configuration.
    InterruptCfg = 0x0B,
    /// Pressure threshold low byte.
    ThsPL = 0x0C,
    /// Pressure threshold high byte.
    ThsPH = 0x0D,
    /// Device identifier register.
    WhoAmI = 0x0F,
    /// Control register 1 (ODR, LPF, BDU, SIM).
    CtrlReg1 = 0x10,
    /// Control register 2 (one-shot, reset, FIFO enable).
    CtrlReg2 = 0x11,
    /// Control register 3 (interrupt routing, pin config).
    CtrlReg3 = 0x12,
    /// FIFO control (watermark + mode).
    FifoCtrl = 0x14,
    /// Reference pressure extra-low byte.
    RefPXl = 0x15,
    /// Reference pressure low byte.
    RefPL = 0x16,
    /// Reference pressure high byte.
    RefPH = 0x17,
    /// Pressure offset low byte.
    RpdsL = 0x18,
    /// Pressure offset high byte.
    RpdsH = 0x19,
    /// Resolution / low-current configuration.
    ResConf = 0x1A,
    /// Interrupt source.
    IntSource = 0x25,
    /// FIFO level and flags.
    FifoStatus = 0x26,
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
    /// Low-pass filter reset (read to reset).
    LpfpRes = 0x33,
}

super::impl_register_address!(Register);

/// Expected values for WHO_AM_I.
pub mod who_am_i {
    /// Expected WHO_AM_I register value.
    pub const EXPECTED: u8 = 0xB1;
}

/// CTRL_REG1 register bits.
pub mod ctrl_reg1 {
    /// SPI 3-wire mode.
    pub const SIM: u8 = 0b0000_0001;
    /// Block data update.
    pub const BDU: u8 = 0b0000_0010;
    /// Low-pass filter configuration mask.
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
    /// Software reset.
    pub const SWRESET: u8 = 0b0000_0100;
    /// Disable I2C.
    pub const I2C_DIS: u8 = 0b0000_1000;
    /// Register address auto-increment.
    pub const IF_ADD_INC: u8 = 0b0001_0000;
    /// Stop filling at watermark.
    pub const STOP_ON_FTH: u8 = 0b0010_0000;
    /// FIFO enable.
    pub const FIFO_EN: u8 = 0b0100_0000;
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
    pub const F_OVR: u8 = 0b0000_1000;
    /// FIFO threshold on INT.
    pub const F_FTH: u8 = 0b0001_0000;
    /// FIFO full (32 samples) on INT.
    pub const F_FSS5: u8 = 0b0010_0000;
    /// Push-pull (0) / open-drain (1) INT pin.
    pub const PP_OD: u8 = 0b0100_0000;
    /// INT pin active low.
    pub const INT_H_L: u8 = 0b1000_0000;
}

/// FIFO_CTRL register bits.
pub mod fifo_ctrl {
    /// Watermark level mask.
    pub const WTM_MASK: u8 = 0b0001_1111;
    /// FIFO mode mask.
    pub const F_MODE_MASK: u8 = 0b1110_0000;
    /// FIFO mode shift.
    pub const F_MODE_SHIFT: u8 = 5;
}

/// RES_CONF register bits.
pub mod res_conf {
    /// Low-current mode.
    pub const LC_EN: u8 = 0b0000_0001;
}

/// FIFO_STATUS register bits.
pub mod fifo_status {
    /// Stored sample count mask.
    pub const FSS_MASK: u8 = 0b0011_1111;
    /// FIFO overrun.
    pub const OVR: u8 = 0b0100_0000;
    /// FIFO threshold reached.
    pub const FTH_FIFO: u8 = 0b1000_0000;
    /// Sample count reported when the FIFO is full.
    pub const FULL_LEVEL: u8 = 32;
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
