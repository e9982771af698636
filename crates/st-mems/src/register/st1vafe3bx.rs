//! ST1VAFE3BX register map (main bank).

/// ST1VAFE3BX register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Extended wake-up duration.
    WakeUpDurExt = 0x0E,
    /// Device identifier register.
    WhoAmI = 0x0F,
    /// Control register 1 (wake-up axes, auto-increment, reset, INT pin).
    Ctrl1 = 0x10,
    /// Control register 2 (INT routing).
    Ctrl2 = 0x11,
    /// Control register 3 (self-test sign, high-performance).
    Ctrl3 = 0x12,
    /// Control register 4 (boot, SOC, FIFO, BDU).
    Ctrl4 = 0x13,
    /// Control register 5 (ODR, bandwidth, full scale).
    Ctrl5 = 0x14,
    /// FIFO control.
    FifoCtrl = 0x15,
    /// FIFO watermark.
    FifoWtm = 0x16,
    /// Interrupt configuration.
    InterruptCfg = 0x17,
    /// 6D threshold configuration.
    Sixd = 0x18,
    /// Wake-up threshold.
    WakeUpThs = 0x1C,
    /// Wake-up duration.
    WakeUpDur = 0x1D,
    /// Free-fall configuration.
    FreeFall = 0x1E,
    /// Function routing on INT.
    Md1Cfg = 0x1F,
    /// Wake-up source.
    WakeUpSrc = 0x21,
    /// Tap source.
    TapSrc = 0x22,
    /// 6D source.
    SixdSrc = 0x23,
    /// Aggregated interrupt source.
    AllIntSrc = 0x24,
    /// Data status.
    Status = 0x25,
    /// FIFO flags.
    FifoStatus1 = 0x26,
    /// FIFO level.
    FifoStatus2 = 0x27,
    /// Accelerometer X low byte.
    OutXL = 0x28,
    /// Accelerometer X high byte.
    OutXH = 0x29,
    /// Accelerometer Y low byte.
    OutYL = 0x2A,
    /// Accelerometer Y high byte.
    OutYH = 0x2B,
    /// Accelerometer Z low byte.
    OutZL = 0x2C,
    /// Accelerometer Z high byte.
    OutZH = 0x2D,
    /// vAFE output low byte.
    OutAhBioL = 0x2E,
    /// vAFE output high byte.
    OutAhBioH = 0x2F,
    /// vAFE configuration 1.
    AhBioCfg1 = 0x30,
    /// vAFE configuration 2.
    AhBioCfg2 = 0x31,
    /// vAFE configuration 3.
    AhBioCfg3 = 0x32,
    /// I3C interface control.
    I3cIfCtrl = 0x33,
    /// Exit deep power-down over SPI.
    EnDeviceConfig = 0x3E,
    /// Embedded function bank access.
    FuncCfgAccess = 0x3F,
    /// FIFO tag byte.
    FifoDataOutTag = 0x40,
    /// FIFO data byte 0.
    FifoDataOut = 0x41,
    /// FIFO batch decimation.
    FifoBatchDec = 0x47,
    /// Timestamp byte 0.
    Timestamp0 = 0x7A,
    /// Timestamp byte 1.
    Timestamp1 = 0x7B,
    /// Timestamp byte 2.
    Timestamp2 = 0x7C,
    /// Timestamp byte 3.
    Timestamp3 = 0x7D,
}

super::impl_register_address!(Register);

/// Expected values for WHO_AM_I.
pub mod who_am_i {
    /// Expected WHO_AM_I register value.
    pub const EXPECTED: u8 = 0x48;
}

/// WAKE_UP_DUR_EXT register bits.
pub mod wake_up_dur_ext {
    /// Extended wake-up duration.
    pub const WU_DUR_EXTENDED: u8 = 0b0001_0000;
}

/// CTRL1 register bits.
pub mod ctrl1 {
    /// Wake-up on Z.
    pub const WU_Z_EN: u8 = 0b0000_0001;
    /// Wake-up on Y.
    pub const WU_Y_EN: u8 = 0b0000_0010;
    /// Wake-up on X.
    pub const WU_X_EN: u8 = 0b0000_0100;
    /// All wake-up axes.
    pub const WU_XYZ_EN: u8 = WU_X_EN | WU_Y_EN | WU_Z_EN;
    /// Pulsed data-ready.
    pub const DRDY_PULSED: u8 = 0b0000_1000;
    /// Register address auto-increment.
    pub const IF_ADD_INC: u8 = 0b0001_0000;
    /// Software reset.
    pub const SW_RESET: u8 = 0b0010_0000;
    /// Route interrupts to the INT pin.
    pub const INT_PIN_EN: u8 = 0b0100_0000;
    /// Smart power.
    pub const SMART_POWER_EN: u8 = 0b1000_0000;
    /// Value written first when binding a 3-wire SPI bus.
    pub const SPI_3WIRE_BIND: u8 = 0x50;
}

/// CTRL2 register bits.
pub mod ctrl2 {
    /// Data-ready on INT.
    pub const INT_DRDY: u8 = 0b0000_1000;
    /// FIFO overrun on INT.
    pub const INT_FIFO_OVR: u8 = 0b0001_0000;
    /// FIFO threshold on INT.
    pub const INT_FIFO_TH: u8 = 0b0010_0000;
    /// FIFO full on INT.
    pub const INT_FIFO_FULL: u8 = 0b0100_0000;
    /// Boot status on INT.
    pub const INT_BOOT: u8 = 0b1000_0000;
}

/// CTRL3 register bits.
pub mod ctrl3 {
    /// Self-test sign X.
    pub const ST_SIGN_X: u8 = 0b0000_0001;
    /// Self-test sign Y.
    pub const ST_SIGN_Y: u8 = 0b0000_0010;
    /// High-performance mode.
    pub const HP_EN: u8 = 0b0000_0100;
}

/// CTRL4 register bits.
pub mod ctrl4 {
    /// Reboot memory content.
    pub const BOOT: u8 = 0b0000_0001;
    /// Start of conversion (software trigger).
    pub const SOC: u8 = 0b0000_0010;
    /// FIFO enable.
    pub const FIFO_EN: u8 = 0b0000_1000;
    /// Embedded functions enable.
    pub const EMB_FUNC_EN: u8 = 0b0001_0000;
    /// Block data update.
    pub const BDU: u8 = 0b0010_0000;
    /// Inactivity ODR mask.
    pub const INACT_ODR_MASK: u8 = 0b1100_0000;
}

/// CTRL5 register bits.
pub mod ctrl5 {
    /// Full-scale mask.
    pub const FS_MASK: u8 = 0b0000_0011;
    /// Full-scale shift.
    pub const FS_SHIFT: u8 = 0;
    /// Bandwidth mask.
    pub const BW_MASK: u8 = 0b0000_1100;
    /// Bandwidth shift.
    pub const BW_SHIFT: u8 = 2;
    /// Output data rate mask.
    pub const ODR_MASK: u8 = 0b1111_0000;
    /// Output data rate shift.
    pub const ODR_SHIFT: u8 = 4;
}

/// FIFO_CTRL register bits.
pub mod fifo_ctrl {
    /// FIFO mode mask.
    pub const FIFO_MODE_MASK: u8 = 0b0000_0111;
    /// Stop filling at threshold.
    pub const STOP_ON_FTH: u8 = 0b0000_1000;
    /// Advanced FIFO (vAFE batching).
    pub const FIFO_EN_ADV: u8 = 0b0001_0000;
    /// FIFO depth (2X compression).
    pub const FIFO_DEPTH: u8 = 0b0100_0000;
    /// Batch configuration changes.
    pub const CFG_CHG_EN: u8 = 0b1000_0000;
}

/// FIFO_WTM register bits.
pub mod fifo_wtm {
    /// Threshold mask.
    pub const FTH_MASK: u8 = 0b0111_1111;
    /// Batch accelerometer only.
    pub const XL_ONLY_FIFO: u8 = 0b1000_0000;
}

/// INTERRUPT_CFG register bits.
pub mod interrupt_cfg {
    /// Global interrupt enable.
    pub const INTERRUPTS_ENABLE: u8 = 0b0000_0001;
    /// Latched interrupts.
    pub const LIR: u8 = 0b0000_0010;
    /// Keep latched sources on read.
    pub const DIS_RST_LIR_ALL_INT: u8 = 0b0000_0100;
    /// Sleep status on INT.
    pub const SLEEP_STATUS_ON_INT: u8 = 0b0000_1000;
    /// Fine wake-up threshold weight.
    pub const WAKE_THS_W: u8 = 0b0010_0000;
    /// Timestamp counter.
    pub const TIMESTAMP_EN: u8 = 0b1000_0000;
}

/// SIXD register bits.
pub mod sixd {
    /// 6D threshold mask.
    pub const D6D_THS_MASK: u8 = 0b0110_0000;
    /// 6D threshold shift.
    pub const D6D_THS_SHIFT: u8 = 5;
    /// 4D mode.
    pub const D4D_EN: u8 = 0b1000_0000;
}

/// WAKE_UP_THS register bits.
pub mod wake_up_ths {
    /// Threshold mask.
    pub const WK_THS_MASK: u8 = 0b0011_1111;
    /// Sleep enable.
    pub const SLEEP_ON: u8 = 0b0100_0000;
}

/// WAKE_UP_DUR register bits.
pub mod wake_up_dur {
    /// Sleep duration mask.
    pub const SLEEP_DUR_MASK: u8 = 0b0000_1111;
    /// Self-test sign Z.
    pub const ST_SIGN_Z: u8 = 0b0001_0000;
    /// Wake duration mask.
    pub const WAKE_DUR_MASK: u8 = 0b0110_0000;
    /// Wake duration shift.
    pub const WAKE_DUR_SHIFT: u8 = 5;
    /// Free-fall duration MSB.
    pub const FF_DUR: u8 = 0b1000_0000;
}

/// MD1_CFG register bits.
pub mod md1_cfg {
    /// Embedded functions on INT.
    pub const INT_EMB_FUNC: u8 = 0b0000_0001;
    /// Timestamp on INT.
    pub const INT_TIMESTAMP: u8 = 0b0000_0010;
    /// 6D on INT.
    pub const INT_6D: u8 = 0b0000_0100;
    /// Tap on INT.
    pub const INT_TAP: u8 = 0b0000_1000;
    /// Free-fall on INT.
    pub const INT_FF: u8 = 0b0001_0000;
    /// Wake-up on INT.
    pub const INT_WU: u8 = 0b0010_0000;
    /// Sleep change on INT.
    pub const INT_SLEEP_CHANGE: u8 = 0b1000_0000;
}

/// SIXD_SRC register bits.
pub mod sixd_src {
    /// X low.
    pub const XL: u8 = 0b0000_0001;
    /// X high.
    pub const XH: u8 = 0b0000_0010;
    /// Y low.
    pub const YL: u8 = 0b0000_0100;
    /// Y high.
    pub const YH: u8 = 0b0000_1000;
    /// Z low.
    pub const ZL: u8 = 0b0001_0000;
    /// Z high.
    pub const ZH: u8 = 0b0010_0000;
    /// 6D event.
    pub const D6D_IA: u8 = 0b0100_0000;
}

/// ALL_INT_SRC register bits.
pub mod all_int_src {
    /// Free-fall event.
    pub const FF_IA_ALL: u8 = 0b0000_0001;
    /// Wake-up event.
    pub const WU_IA_ALL: u8 = 0b0000_0010;
    /// Single tap.
    pub const SINGLE_TAP_ALL: u8 = 0b0000_0100;
    /// Double tap.
    pub const DOUBLE_TAP_ALL: u8 = 0b0000_1000;
    /// Triple tap.
    pub const TRIPLE_TAP_ALL: u8 = 0b0001_0000;
    /// 6D event.
    pub const D6D_IA_ALL: u8 = 0b0010_0000;
    /// Sleep change.
    pub const SLEEP_CHANGE_IA_ALL: u8 = 0b0100_0000;
}

/// STATUS register bits.
pub mod status {
    /// Data ready.
    pub const DRDY: u8 = 0b0000_0001;
    /// Any interrupt active.
    pub const INT_GLOBAL: u8 = 0b0010_0000;
}

/// FIFO_STATUS1 register bits.
pub mod fifo_status1 {
    /// FIFO overrun.
    pub const FIFO_OVR_IA: u8 = 0b0100_0000;
    /// FIFO watermark reached.
    pub const FIFO_WTM_IA: u8 = 0b1000_0000;
}

/// AH_BIO_CFG2 register bits.
pub mod ah_bio_cfg2 {
    /// vAFE enable.
    pub const AH_BIO_EN: u8 = 0b0000_0001;
}

/// AH_BIO_CFG3 register bits.
pub mod ah_bio_cfg3 {
    /// vAFE active.
    pub const AH_BIO_ACTIVE: u8 = 0b0000_0001;
    /// Self-test mask.
    pub const ST_MASK: u8 = 0b0011_0000;
    /// Self-test shift.
    pub const ST_SHIFT: u8 = 4;
}

/// I3C_IF_CTRL register bits.
pub mod i3c_if_ctrl {
    /// Anti-spike filter always on.
    pub const ASF_ON: u8 = 0b0010_0000;
}

/// EN_DEVICE_CONFIG register bits.
pub mod en_device_config {
    /// Leave deep power-down.
    pub const EN_DEV_CONF: u8 = 0b0000_0001;
}

/// FUNC_CFG_ACCESS register bits.
pub mod func_cfg_access {
    /// Embedded function register bank.
    pub const EMB_FUNC_REG_ACCESS: u8 = 0b1000_0000;
}

/// FIFO_DATA_OUT_TAG register bits.
pub mod fifo_data_out_tag {
    /// Tag shift.
    pub const TAG_SHIFT: u8 = 3;
}

/// FIFO_BATCH_DEC register bits.
pub mod fifo_batch_dec {
    /// Accelerometer batch rate mask.
    pub const BDR_XL_MASK: u8 = 0b0000_0111;
    /// Timestamp decimation mask.
    pub const DEC_TS_BATCH_MASK: u8 = 0b0001_1000;
    /// Timestamp decimation shift.
    pub const DEC_TS_BATCH_SHIFT: u8 = 3;
}
