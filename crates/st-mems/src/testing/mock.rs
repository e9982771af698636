extern crate std;

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::error::Error;
use crate::interface::{Interface, sealed};

/// Bus access recorded by [`MockInterface`], in issue order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Access {
    Read(u8),
    Write(u8),
}

/// In-memory register file with a write log.
///
/// Bits registered through `with_autoclear` behave like BOOT / SW_RESET:
/// the write is logged with the bit set but the stored value has it cleared.
/// Blocks pushed through `queue_block` are returned by successive burst reads
/// starting at their address, overriding the register file.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    regs: [u8; 256],
    autoclear: [u8; 256],
    writes: Vec<(u8, u8)>,
    write_bursts: Vec<(u8, Vec<u8>)>,
    accesses: Vec<Access>,
    queued: VecDeque<(u8, Vec<u8>)>,
    fail_reads: bool,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            autoclear: [0u8; 256],
            writes: Vec::new(),
            write_bursts: Vec::new(),
            accesses: Vec::new(),
            queued: VecDeque::new(),
            fail_reads: false,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.set_reg(reg, value);
        self
    }

    pub(crate) fn with_autoclear(mut self, reg: u8, mask: u8) -> Self {
        self.autoclear[reg as usize] |= mask;
        self
    }

    pub(crate) fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub(crate) fn set_reg(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub(crate) fn queue_block(&mut self, reg: u8, data: &[u8]) {
        self.queued.push_back((reg, data.to_vec()));
    }

    pub(crate) fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub(crate) fn write_bursts(&self) -> &[(u8, Vec<u8>)] {
        &self.write_bursts
    }

    pub(crate) fn accesses(&self) -> &[Access] {
        &self.accesses
    }

    pub(crate) fn clear_log(&mut self) {
        self.writes.clear();
        self.write_bursts.clear();
        self.accesses.clear();
    }

    fn store(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value & !self.autoclear[reg as usize];
    }
}

impl Interface for MockInterface {
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut buffer = [0u8];
        self.read_regs(reg, &mut buffer).await?;
        Ok(buffer[0])
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if self.fail_reads {
            return Err(Error::Bus);
        }
        if buffer.is_empty() {
            return Ok(());
        }
        self.accesses.push(Access::Read(reg));
        if self.queued.front().is_some_and(|(addr, _)| *addr == reg) {
            if let Some((_, block)) = self.queued.pop_front() {
                for (slot, value) in buffer.iter_mut().zip(block.iter()) {
                    *slot = *value;
                }
                return Ok(());
            }
        }
        for (offset, slot) in buffer.iter_mut().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            *slot = self.regs[addr as usize];
        }
        Ok(())
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.store(reg, value);
        self.writes.push((reg, value));
        self.accesses.push(Access::Write(reg));
        Ok(())
    }

    async fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        if data.is_empty() {
            return Ok(());
        }
        for (offset, value) in data.iter().enumerate() {
            self.store(reg.wrapping_add(offset as u8), *value);
        }
        self.write_bursts.push((reg, data.to_vec()));
        self.accesses.push(Access::Write(reg));
        Ok(())
    }
}

impl sealed::Sealed for MockInterface {}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
    pub(crate) last_ns: Option<u32>,
    pub(crate) total_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.last_ns = Some(ns);
        self.total_ns += u64::from(ns);
    }
}

/// INT pin stand-in that is always at the requested level.
#[derive(Default, Debug)]
pub(crate) struct MockPin {
    pub(crate) waits: u32,
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal_async::digital::Wait for MockPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.waits += 1;
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.waits += 1;
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.waits += 1;
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.waits += 1;
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.waits += 1;
        Ok(())
    }
}
