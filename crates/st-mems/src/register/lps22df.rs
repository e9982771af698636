//! LPS22DF register map.

/// LPS22DF register addresses.
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
    /// Control register 1 (ODR + averaging).
    CtrlReg1 = 0x10,
    /// Control register 2 (one-shot, reset, BDU, LPF).
    CtrlReg2 = 0x11,
    /// Control register 3 (auto-increment, pin electrical config).
    CtrlReg3 = 0x12,
    /// Control register 4 (interrupt routing).
    CtrlReg4 = 0x13,
    /// FIFO control.
    FifoCtrl = 0x14,
    /// FIFO watermark.
    FifoWtm = 0x15,
    /// Reference pressure low byte.
    RefPL = 0x16,
    /// Reference pressure high byte.
    RefPH = 0x17,
    /// I3C interface control.
    I3cIfCtrl = 0x19,
    /// Pressure offset low byte.
    RpdsL = 0x1A,
    /// Pressure offset high byte.
    RpdsH = 0x1B,
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
}

super::impl_register_address!(Register);

/// Expected values for WHO_AM_I.
pub mod who_am_i {
    /// Expected WHO_AM_I register value.
    pub const EXPECTED: u8 = 0xB4;
}

/// IF_CTRL register bits.
pub mod if_ctrl {
    /// SPI 3-wire mode.
    pub const SIM: u8 = 0b0010_0000;
    /// Disable I2C and I3C interfaces.
    pub const I2C_I3C_DIS: u8 = 0b0100_0000;
    /// INT pin driven as output with I3C.
    pub const INT_EN_I3C: u8 = 0b1000_0000;
}

/// CTRL_REG1 register bits.
pub mod ctrl_reg1 {
    /// Averaging selection mask.
    pub const AVG_MASK: u8 = 0b0000_0111;
    /// Averaging selection shift.
    pub const AVG_SHIFT: u8 = 0;
    /// Output data rate mask.
    pub const ODR_MASK: u8 = 0b0111_1000;
    /// Output data rate shift.
    pub const ODR_SHIFT: u8 = 3;
}

/// CTRL_REG2 register bits.
pub mod ctrl_reg2 {
    /// One-shot trigger.
    pub const ONESHOT: u8 = 0b0000_0001;
    /// Software reset.
    pub const SWRESET: u8 = 0b0000_0100;
    /// Block data update.
    pub const BDU: u8 = 0b0000_1000;
    /// Low-pass filter enable.
    pub const EN_LPFP: u8 = 0b0001_0000;
    /// Low-pass filter bandwidth (0 = ODR/4, 1 = ODR/9).
    pub const LFPF_CFG: u8 = 0b0010_0000;
    /// Reboot memory content.
    pub const BOOT: u8 = 0b1000_0000;
}

/// CTRL_REG3 register bits.
pub mod ctrl_reg3 {
    /// Register address auto-increment.
    pub const IF_ADD_INC: u8 = 0b0000_0001;
    /// Push-pull (0) / open-drain (1) INT pin.
    pub const PP_OD: u8 = 0b0000_0010;
    /// INT pin active low.
    pub const INT_H_L: u8 = 0b0000_1000;
}

/// CTRL_REG4 register bits.
pub mod ctrl_reg4 {
    /// FIFO overrun on INT.
    pub const INT_F_OVR: u8 = 0b0000_0001;
    /// FIFO watermark on INT.
    pub const INT_F_WTM: u8 = 0b0000_0010;
    /// FIFO full on INT.
    pub const INT_F_FULL: u8 = 0b0000_0100;
    /// Interrupt signal on INT pin.
    pub const INT_EN: u8 = 0b0001_0000;
    /// Data-ready on INT.
    pub const DRDY: u8 = 0b0010_0000;
    /// Pulsed data-ready.
    pub const DRDY_PLS: u8 = 0b0100_0000;
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

/// I3C_IF_CTRL register bits.
pub mod i3c_if_ctrl {
    /// Anti-spike filter always on.
    pub const ASF_ON: u8 = 0b0010_0000;
}

/// INT_SOURCE register bits.
pub mod int_source {
    /// Boot phase running.
    pub const BOOT_ON: u8 = 0b1000_0000;
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
