use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::interface::Mma8451Interface;
use crate::registers::{DEVICE_ID, REG_CTRL_REG2, REG_OUT_X_MSB, REG_OUT_Z_LSB, REG_WHO_AM_I, RST};

/// One register transaction seen by [`MockInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transaction {
    Read(u8),
    Write(u8, u8),
    ReadMany(u8, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

/// Register-file mock that records every transaction.
///
/// `CTRL_REG2.RST` stays set for `reset_busy_reads` reads after it is written,
/// then clears the way the device does when the reset completes.
#[derive(Debug, Clone)]
pub(crate) struct MockInterface {
    regs: [u8; 256],
    log: Vec<Transaction>,
    reset_busy_reads: usize,
    fail_at: Option<usize>,
}

impl Default for MockInterface {
    fn default() -> Self {
        let mut regs = [0u8; 256];
        regs[REG_WHO_AM_I as usize] = DEVICE_ID;
        Self {
            regs,
            log: Vec::new(),
            reset_busy_reads: 0,
            fail_at: None,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    pub(crate) fn with_regs(mut self, start: u8, values: &[u8]) -> Self {
        for (offset, value) in values.iter().enumerate() {
            self.regs[start.wrapping_add(offset as u8) as usize] = *value;
        }
        self
    }

    pub(crate) fn with_reset_busy_reads(mut self, reads: usize) -> Self {
        self.reset_busy_reads = reads;
        self
    }

    /// Fails the transaction with zero-based index `index`.
    pub(crate) fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub(crate) fn log(&self) -> &[Transaction] {
        &self.log
    }

    pub(crate) fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|t| match *t {
                Transaction::Write(reg, value) => Some((reg, value)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, transaction: Transaction) -> Result<(), MockError> {
        let index = self.log.len();
        self.log.push(transaction);
        if self.fail_at == Some(index) {
            return Err(MockError);
        }
        Ok(())
    }
}

impl Mma8451Interface for MockInterface {
    type Error = MockError;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.record(Transaction::Write(register, value))?;
        // Output registers are read-only on the device.
        if !(REG_OUT_X_MSB..=REG_OUT_Z_LSB).contains(&register) {
            self.regs[register as usize] = value;
        }
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        self.record(Transaction::Read(register))?;
        let slot = &mut self.regs[register as usize];
        if register == REG_CTRL_REG2 && *slot & RST != 0 {
            if self.reset_busy_reads == 0 {
                *slot = 0;
            } else {
                self.reset_busy_reads -= 1;
            }
        }
        Ok(*slot)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.record(Transaction::ReadMany(register, buf.len()))?;
        for (offset, slot) in buf.iter_mut().enumerate() {
            *slot = self.regs[register.wrapping_add(offset as u8) as usize];
        }
        Ok(())
    }
}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
    }
}
