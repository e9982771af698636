//! Pressure / temperature channel bookkeeping shared by the pressure drivers.
//!
//! Both channels share one data-rate setting on these parts. The last rate is
//! kept while the device is powered down so enabling either channel restores
//! it.

use crate::error::Error;

/// Measurement channel of a pressure sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Channel {
    Pressure,
    Temperature,
}

impl Channel {
    const fn other(self) -> Self {
        match self {
            Self::Pressure => Self::Temperature,
            Self::Temperature => Self::Pressure,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ChannelState<R> {
    initialized: bool,
    pressure: bool,
    temperature: bool,
    last_rate: R,
}

impl<R: Copy> ChannelState<R> {
    pub(crate) const fn new(last_rate: R) -> Self {
        Self {
            initialized: false,
            pressure: false,
            temperature: false,
            last_rate,
        }
    }

    pub(crate) const fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    pub(crate) const fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Pressure => self.pressure,
            Channel::Temperature => self.temperature,
        }
    }

    pub(crate) fn set_enabled(&mut self, channel: Channel, enabled: bool) {
        match channel {
            Channel::Pressure => self.pressure = enabled,
            Channel::Temperature => self.temperature = enabled,
        }
    }

    pub(crate) const fn last_rate(&self) -> R {
        self.last_rate
    }

    pub(crate) fn set_last_rate(&mut self, rate: R) {
        self.last_rate = rate;
    }
}

/// Data-rate plumbing a pressure driver provides; the channel logic is shared.
pub(crate) trait RateControl {
    /// Device rate setting saved across power-down.
    type Rate: Copy;

    fn channels(&self) -> &ChannelState<Self::Rate>;

    fn channels_mut(&mut self) -> &mut ChannelState<Self::Rate>;

    async fn read_rate(&mut self) -> Result<Self::Rate, Error>;

    async fn write_rate(&mut self, rate: Self::Rate) -> Result<(), Error>;

    /// Stops continuous conversion; `current` is the rate read just before.
    async fn power_down(&mut self, current: Self::Rate) -> Result<(), Error>;

    /// Rate to program for `hz_milli`, derived from the current setting.
    fn retune(current: Self::Rate, hz_milli: u32) -> Self::Rate;

    async fn enable_channel(&mut self, channel: Channel) -> Result<(), Error> {
        if self.channels().is_enabled(channel) {
            return Ok(());
        }
        let rate = self.channels().last_rate();
        self.write_rate(rate).await?;
        self.channels_mut().set_enabled(channel, true);
        debug!("channel {} enabled", channel as u8);
        Ok(())
    }

    async fn disable_channel(&mut self, channel: Channel) -> Result<(), Error> {
        if !self.channels().is_enabled(channel) {
            return Ok(());
        }
        if !self.channels().is_enabled(channel.other()) {
            let current = self.read_rate().await?;
            self.channels_mut().set_last_rate(current);
            self.power_down(current).await?;
            debug!("both channels off, device powered down");
        }
        self.channels_mut().set_enabled(channel, false);
        Ok(())
    }

    async fn set_channel_rate(&mut self, channel: Channel, hz_milli: u32) -> Result<(), Error> {
        if self.channels().is_enabled(channel) {
            let current = self.read_rate().await?;
            self.write_rate(Self::retune(current, hz_milli)).await?;
            let applied = self.read_rate().await?;
            self.channels_mut().set_last_rate(applied);
            debug!("odr requested {} mHz", hz_milli);
        } else {
            let stored = Self::retune(self.channels().last_rate(), hz_milli);
            self.channels_mut().set_last_rate(stored);
        }
        Ok(())
    }

    /// Disables both channels and forgets the init state.
    async fn deinit_channels(&mut self) -> Result<(), Error> {
        self.disable_channel(Channel::Pressure).await?;
        self.disable_channel(Channel::Temperature).await?;
        self.channels_mut().set_initialized(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use futures::executor::block_on;
    use std::vec::Vec;

    struct Recorder {
        state: ChannelState<u32>,
        device_rate: u32,
        log: Vec<&'static str>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                state: ChannelState::new(25),
                device_rate: 0,
                log: Vec::new(),
            }
        }
    }

    impl RateControl for Recorder {
        type Rate = u32;

        fn channels(&self) -> &ChannelState<u32> {
            &self.state
        }

        fn channels_mut(&mut self) -> &mut ChannelState<u32> {
            &mut self.state
        }

        async fn read_rate(&mut self) -> Result<u32, Error> {
            self.log.push("read");
            Ok(self.device_rate)
        }

        async fn write_rate(&mut self, rate: u32) -> Result<(), Error> {
            self.log.push("write");
            self.device_rate = rate;
            Ok(())
        }

        async fn power_down(&mut self, _current: u32) -> Result<(), Error> {
            self.log.push("power_down");
            self.device_rate = 0;
            Ok(())
        }

        fn retune(_current: u32, hz_milli: u32) -> u32 {
            hz_milli / 1_000
        }
    }

    #[test]
    fn enable_restores_last_rate_once() {
        let mut dev = Recorder::new();
        block_on(dev.enable_channel(Channel::Pressure)).expect("enable");
        block_on(dev.enable_channel(Channel::Pressure)).expect("enable again");
        assert_eq!(dev.device_rate, 25);
        assert_eq!(dev.log, ["write"]);
        assert!(dev.channels().is_enabled(Channel::Pressure));
    }

    #[test]
    fn disable_powers_down_only_with_both_channels_off() {
        let mut dev = Recorder::new();
        block_on(dev.enable_channel(Channel::Pressure)).expect("enable p");
        block_on(dev.enable_channel(Channel::Temperature)).expect("enable t");
        dev.device_rate = 50;
        dev.log.clear();

        block_on(dev.disable_channel(Channel::Pressure)).expect("disable p");
        assert!(dev.log.is_empty());
        assert_eq!(dev.device_rate, 50);

        block_on(dev.disable_channel(Channel::Temperature)).expect("disable t");
        assert_eq!(dev.log, ["read", "power_down"]);
        assert_eq!(dev.channels().last_rate(), 50);

        block_on(dev.enable_channel(Channel::Temperature)).expect("re-enable");
        assert_eq!(dev.device_rate, 50);
    }

    #[test]
    fn rate_change_while_disabled_is_only_stored() {
        let mut dev = Recorder::new();
        block_on(dev.set_channel_rate(Channel::Pressure, 75_000)).expect("odr");
        assert!(dev.log.is_empty());
        assert_eq!(dev.channels().last_rate(), 75);

        block_on(dev.enable_channel(Channel::Pressure)).expect("enable");
        dev.log.clear();
        block_on(dev.set_channel_rate(Channel::Pressure, 10_000)).expect("odr");
        assert_eq!(dev.log, ["read", "write", "read"]);
        assert_eq!(dev.channels().last_rate(), 10);
    }

    #[test]
    fn deinit_clears_flags() {
        let mut dev = Recorder::new();
        dev.channels_mut().set_initialized(true);
        block_on(dev.enable_channel(Channel::Pressure)).expect("enable");
        block_on(dev.deinit_channels()).expect("deinit");
        assert!(!dev.channels().is_initialized());
        assert!(!dev.channels().is_enabled(Channel::Pressure));
        assert_eq!(dev.device_rate, 0);
    }
}
