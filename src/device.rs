//! High-level MMA8451 device driver implementation.

use crate::config::Config;
use crate::data::{Acceleration, RawSample, RAW_SAMPLE_BYTES};
use crate::error::{Error, Result};
use crate::interface::{DeviceAddress, I2cInterface, Mma8451Interface};
use crate::params::Unit;
use crate::registers::{
    standby_ctrl_reg1,
    CtrlReg1,
    CtrlReg2,
    InterruptSources,
    PlConfig,
    Register,
    SystemMode,
    TransientCfg,
    TransientThreshold,
    XyzDataCfg,
    DEVICE_ID,
    ORIENTATION_MASK,
    REG_CTRL_REG4,
    REG_CTRL_REG5,
    REG_F_SETUP,
    REG_OUT_X_MSB,
    REG_PL_STATUS,
    REG_TRANSIENT_COUNT,
    REG_TRANSIENT_SRC,
    REG_WHO_AM_I,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// Pause before each CTRL_REG2 read while the soft reset completes (microseconds).
const RESET_POLL_INTERVAL_US: u32 = 100;

/// Lifecycle of the driver as seen from the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// No successful [`Mma8451::init`] yet, or the last one failed.
    Uninitialized,
    /// Soft reset issued, waiting for `CTRL_REG2.RST` to clear.
    Resetting,
    /// Standby with motion detection programmed, not yet sampling.
    Configured,
    /// Continuously sampling.
    Active,
}

/// High-level synchronous driver for the MMA8451 accelerometer.
///
/// The driver performs no locking. Each method runs its register
/// transactions to completion, and the latch write plus burst read in
/// [`acceleration`](Self::acceleration) must not be interleaved with other
/// traffic to the same device.
pub struct Mma8451<IFACE> {
    interface: IFACE,
    config: Config,
    state: DriverState,
}

impl<IFACE> Mma8451<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// No bus traffic happens until [`init`](Self::init).
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            state: DriverState::Uninitialized,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration. Takes effect on the next [`init`](Self::init).
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Returns the current driver state.
    pub fn state(&self) -> DriverState {
        self.state
    }
}

impl<I2C> Mma8451<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: DeviceAddress, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Mma8451<IFACE>
where
    IFACE: Mma8451Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Verifies the device, resets it and brings it into active sampling with
    /// transient detection routed to INT1.
    ///
    /// The sequence aborts on the first failure. After an error the device
    /// configuration is unknown and `init` has to be repeated from the start.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        info!("MMA8451 init");
        let result = self.run_init_sequence(delay);
        self.state = match result {
            Ok(()) => DriverState::Active,
            Err(_) => DriverState::Uninitialized,
        };
        result
    }

    fn run_init_sequence(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.state = DriverState::Uninitialized;
        self.check_id()?;
        self.reset(delay)?;

        // FIFO off.
        self.write_reg(REG_F_SETUP, 0x00)?;
        self.write_bits(CtrlReg2::new().with_mods(self.config.oversampling))?;

        // Motion registers are only writable in standby.
        self.write_bits(standby_ctrl_reg1())?;
        self.configure_transient()?;

        let data_cfg = XyzDataCfg::new()
            .with_range(self.config.range)
            .with_hpf_out(self.config.high_pass_output);
        self.write_bits(data_cfg)?;
        self.state = DriverState::Configured;

        let standby: CtrlReg1 = self.read_bits()?;
        debug!("CTRL_REG1 before activation: {=u8:#x}", u8::from(standby));

        let active = CtrlReg1::new()
            .with_active(true)
            .with_low_noise(self.config.low_noise)
            .with_data_rate(self.config.data_rate);
        self.write_bits(active)?;

        self.write_bits(PlConfig::new().with_enable(true))?;
        info!("MMA8451 active");
        Ok(())
    }

    fn configure_transient(&mut self) -> Result<(), CommE> {
        let cfg = TransientCfg::new()
            .with_x_enable(true)
            .with_y_enable(true)
            .with_z_enable(true)
            .with_latch(true);
        self.write_bits(cfg)?;

        let threshold = TransientThreshold::new().with_threshold(self.config.transient_threshold);
        self.write_bits(threshold)?;
        self.write_reg(REG_TRANSIENT_COUNT, self.config.transient_debounce)?;

        let transient = InterruptSources::new().with_transient(true);
        self.write_reg(REG_CTRL_REG4, transient.into())?;
        // CTRL_REG4/5 share the INT_SOURCE layout. Set bit routes to INT1.
        self.write_reg(REG_CTRL_REG5, transient.into())?;
        Ok(())
    }

    /// Checks `WHO_AM_I` against the MMA8451 device ID.
    pub fn check_id(&mut self) -> Result<(), CommE> {
        let id = self.read_reg(REG_WHO_AM_I)?;
        if id != DEVICE_ID {
            warn!("unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::DeviceNotFound(id));
        }
        Ok(())
    }

    /// Issues a soft reset and waits for the device to clear `CTRL_REG2.RST`.
    ///
    /// Polls at most [`Config::reset_poll_limit`] times. All registers return
    /// to their defaults, so the driver is left uninitialized.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.state = DriverState::Resetting;
        self.write_bits(CtrlReg2::new().with_reset(true))?;

        for poll in 1..=self.config.reset_poll_limit {
            delay.delay_us(RESET_POLL_INTERVAL_US);
            let ctrl2: CtrlReg2 = self.read_bits()?;
            if !ctrl2.reset() {
                trace!("reset done after {=u16} polls", poll);
                self.state = DriverState::Uninitialized;
                return Ok(());
            }
        }

        warn!("reset bit still set after {=u16} polls", self.config.reset_poll_limit);
        Err(Error::ResetTimeout)
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the signed 14-bit X, Y, Z counts.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        Ok(self.read_sample()?.counts())
    }

    /// Reads one sample and scales it to `unit` using the configured range.
    pub fn acceleration(&mut self, unit: Unit) -> Result<Acceleration, CommE> {
        let sample = self.read_sample()?;
        Ok(sample.scaled(self.config.range, unit))
    }

    fn read_sample(&mut self) -> Result<RawSample, CommE> {
        self.ensure_active()?;

        // Writing OUT_X_MSB latches all six output bytes from one sample.
        self.write_reg(REG_OUT_X_MSB, 0)?;
        let mut raw = [0u8; RAW_SAMPLE_BYTES];
        self
            .interface
            .read_many(REG_OUT_X_MSB, &mut raw)
            .map_err(Error::from)?;

        Ok(RawSample(raw))
    }

    // ==================================================================
    // == Events & Status ===============================================
    // ==================================================================
    /// Returns the raw `TRANSIENT_SRC` byte.
    ///
    /// The read clears the latched event; decode with
    /// [`TransientSource`](crate::registers::TransientSource) if needed.
    pub fn read_transient_source(&mut self) -> Result<u8, CommE> {
        self.ensure_active()?;
        self.read_reg(REG_TRANSIENT_SRC)
    }

    /// Returns the low three bits of `PL_STATUS`, undecoded.
    pub fn orientation(&mut self) -> Result<u8, CommE> {
        self.ensure_active()?;
        Ok(self.read_reg(REG_PL_STATUS)? & ORIENTATION_MASK)
    }

    /// Reads `INT_SOURCE`. Valid in any state.
    pub fn read_interrupt_source(&mut self) -> Result<InterruptSources, CommE> {
        self.read_bits()
    }

    /// Reads `SYSMOD`. Valid in any state.
    pub fn read_system_mode(&mut self) -> Result<SystemMode, CommE> {
        self.read_bits()
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================

    fn ensure_active(&self) -> Result<(), CommE> {
        if self.state != DriverState::Active {
            return Err(Error::NotReady);
        }
        Ok(())
    }

    fn read_reg(&mut self, register: u8) -> Result<u8, CommE> {
        self.interface.read_register(register).map_err(Error::from)
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        self
            .interface
            .write_register(register, value)
            .map_err(Error::from)
    }

    fn read_bits<R: Register>(&mut self) -> Result<R, CommE> {
        Ok(<R as From<u8>>::from(self.read_reg(R::ADDRESS)?))
    }

    fn write_bits<R: Register>(&mut self, value: R) -> Result<(), CommE> {
        self.write_reg(R::ADDRESS, value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DataRate, Range, SysMode};
    use crate::registers::TransientSource;
    use crate::testing::{MockDelay, MockError, MockInterface, Transaction};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::vec;
    use std::vec::Vec;

    use Transaction::{Read, ReadMany, Write};

    fn expected_init_log(reset_polls: usize) -> Vec<Transaction> {
        let mut log = vec![Read(0x0D), Write(0x2B, 0x40)];
        log.extend(core::iter::repeat(Read(0x2B)).take(reset_polls));
        log.extend([
            Write(0x09, 0x00),
            Write(0x2B, 0x02),
            Write(0x2A, 0x18),
            Write(0x1D, 0x1E),
            Write(0x1F, 16),
            Write(0x20, 5),
            Write(0x2D, 0x20),
            Write(0x2E, 0x20),
            Write(0x0E, 0x11),
            Read(0x2A),
            Write(0x2A, 0x01),
            Write(0x11, 0x40),
        ]);
        log
    }

    fn active_driver(mock: MockInterface) -> Mma8451<MockInterface> {
        let mut device = Mma8451::new(mock, Config::default());
        device.init(&mut MockDelay::default()).unwrap();
        device
    }

    #[test]
    fn init_runs_sequence_in_order() {
        let mut device = Mma8451::new(MockInterface::default(), Config::default());
        device.init(&mut MockDelay::default()).unwrap();

        assert_eq!(device.state(), DriverState::Active);
        assert_eq!(device.interface_mut().log(), expected_init_log(1).as_slice());
    }

    #[test]
    fn init_polls_reset_until_bit_clears() {
        let mock = MockInterface::default().with_reset_busy_reads(3);
        let mut device = Mma8451::new(mock, Config::default());
        let mut delay = MockDelay::default();
        device.init(&mut delay).unwrap();

        assert_eq!(device.interface_mut().log(), expected_init_log(4).as_slice());
        assert!(delay.calls >= 4);
    }

    #[test]
    fn reset_poll_is_bounded() {
        let mock = MockInterface::default().with_reset_busy_reads(10);
        let config = Config::new().reset_poll_limit(3).build();
        let mut device = Mma8451::new(mock, config);

        assert_eq!(
            device.init(&mut MockDelay::default()),
            Err(Error::ResetTimeout)
        );
        assert_eq!(device.state(), DriverState::Uninitialized);
        assert_eq!(
            device.interface_mut().log(),
            &[Read(0x0D), Write(0x2B, 0x40), Read(0x2B), Read(0x2B), Read(0x2B)]
        );
    }

    #[test]
    fn identity_mismatch_stops_before_any_write() {
        let mock = MockInterface::default().with_reg(REG_WHO_AM_I, 0x2A);
        let mut device = Mma8451::new(mock, Config::default());

        assert_eq!(
            device.init(&mut MockDelay::default()),
            Err(Error::DeviceNotFound(0x2A))
        );
        assert_eq!(device.interface_mut().log(), &[Read(0x0D)]);
        assert!(device.interface_mut().writes().is_empty());
    }

    #[test]
    fn transport_failure_aborts_at_that_transaction() {
        let steps = expected_init_log(1).len();
        for index in 0..steps {
            let mock = MockInterface::default().failing_at(index);
            let mut device = Mma8451::new(mock, Config::default());

            assert_eq!(
                device.init(&mut MockDelay::default()),
                Err(Error::Interface(MockError))
            );
            assert_eq!(device.state(), DriverState::Uninitialized);
            assert_eq!(
                device.interface_mut().log(),
                &expected_init_log(1)[..=index],
                "failure at transaction {index}"
            );
        }
    }

    #[test]
    fn invalid_config_is_rejected_without_bus_traffic() {
        let config = Config::new().range(Range::G8).low_noise(true).build();
        let mut device = Mma8451::new(MockInterface::default(), config);

        assert_eq!(
            device.init(&mut MockDelay::default()),
            Err(Error::InvalidConfig)
        );
        assert!(device.interface_mut().log().is_empty());
    }

    #[test]
    fn config_feeds_register_values() {
        let config = Config::new()
            .data_rate(DataRate::Hz100)
            .low_noise(true)
            .range(Range::G2)
            .high_pass_output(false)
            .transient_threshold(0x7F)
            .transient_debounce(10)
            .build();
        let mut device = Mma8451::new(MockInterface::default(), config);
        device.init(&mut MockDelay::default()).unwrap();

        let writes = device.interface_mut().writes();
        assert!(writes.contains(&(0x1F, 0x7F)));
        assert!(writes.contains(&(0x20, 10)));
        assert!(writes.contains(&(0x0E, 0x00)));
        assert_eq!(writes.last(), Some(&(0x11, 0x40)));
        assert_eq!(writes[writes.len() - 2], (0x2A, 0x18 | 0x04 | 0x01));
    }

    #[test]
    fn runtime_reads_require_init() {
        let mut device = Mma8451::new(MockInterface::default(), Config::default());

        assert_eq!(device.acceleration(Unit::G), Err(Error::NotReady));
        assert_eq!(device.read_xyz_raw(), Err(Error::NotReady));
        assert_eq!(device.read_transient_source(), Err(Error::NotReady));
        assert_eq!(device.orientation(), Err(Error::NotReady));
        assert!(device.interface_mut().log().is_empty());
    }

    #[test]
    fn acceleration_latches_then_burst_reads() {
        // X = +2048 (reserved bits set), Y = -2048, Z = 0
        let mock = MockInterface::default()
            .with_regs(REG_OUT_X_MSB, &[0x20, 0x03, 0xE0, 0x00, 0x00, 0x00]);
        let mut device = active_driver(mock);

        let g = device.acceleration(Unit::G).unwrap();
        assert_eq!((g.x, g.y, g.z), (1.0, -1.0, 0.0));
        assert_eq!(g.unit.symbol(), "g");

        let log = device.interface_mut().log();
        assert_eq!(&log[log.len() - 2..], &[Write(0x01, 0x00), ReadMany(0x01, 6)]);

        let si = device.acceleration(Unit::MetersPerSecondSquared).unwrap();
        assert_eq!(si.x, 9.80655);
        assert_eq!(si.y, -9.80655);
        assert_eq!(si.z, 0.0);
        assert_eq!(si.unit.symbol(), "m/s²");
    }

    #[test]
    fn acceleration_issues_one_latch_write_per_read() {
        let mut device = active_driver(MockInterface::default());
        let init_len = device.interface_mut().log().len();

        device.acceleration(Unit::default()).unwrap();
        device.read_xyz_raw().unwrap();

        let log = &device.interface_mut().log()[init_len..];
        assert_eq!(
            log,
            &[
                Write(0x01, 0x00),
                ReadMany(0x01, 6),
                Write(0x01, 0x00),
                ReadMany(0x01, 6),
            ]
        );
    }

    #[test]
    fn zero_sample_reads_as_zero() {
        let mut device = active_driver(MockInterface::default());
        let si = device.acceleration(Unit::MetersPerSecondSquared).unwrap();
        assert_eq!((si.x, si.y, si.z), (0.0, 0.0, 0.0));
        assert_eq!(device.read_xyz_raw().unwrap(), [0, 0, 0]);
    }

    #[test]
    fn status_reads_return_register_contents() {
        let mock = MockInterface::default()
            .with_reg(0x1E, 0b0100_0010)
            .with_reg(0x10, 0b1100_0110)
            .with_reg(0x0C, 0x20)
            .with_reg(0x0B, 0x01);
        let mut device = active_driver(mock);

        let transient = device.read_transient_source().unwrap();
        assert_eq!(transient, 0x42);
        let decoded = TransientSource::from(transient);
        assert!(decoded.event_active() && decoded.x_event());

        assert_eq!(device.orientation().unwrap(), 0x06);
        assert!(device.read_interrupt_source().unwrap().transient());
        assert_eq!(device.read_system_mode().unwrap().mode(), SysMode::Wake);
    }

    #[test]
    fn reserved_system_mode_decodes_without_panic() {
        let mut device = Mma8451::new(
            MockInterface::default().with_reg(0x0B, 0x03),
            Config::default(),
        );

        let sysmod = device.read_system_mode().unwrap();
        assert_eq!(sysmod.mode(), SysMode::Reserved);
        assert_eq!(device.interface_mut().log(), &[Read(0x0B)]);
    }

    #[test]
    fn failed_latch_write_skips_burst_read() {
        let init_len = expected_init_log(1).len();
        let mut device = active_driver(MockInterface::default().failing_at(init_len));

        assert_eq!(
            device.acceleration(Unit::G),
            Err(Error::Interface(MockError))
        );
        assert_eq!(device.state(), DriverState::Active);
        assert_eq!(&device.interface_mut().log()[init_len..], &[Write(0x01, 0x00)]);
    }

    #[test]
    fn failed_burst_read_propagates() {
        let init_len = expected_init_log(1).len();
        let mut device = active_driver(MockInterface::default().failing_at(init_len + 1));

        assert_eq!(device.read_xyz_raw(), Err(Error::Interface(MockError)));
        assert_eq!(device.state(), DriverState::Active);
        assert_eq!(
            &device.interface_mut().log()[init_len..],
            &[Write(0x01, 0x00), ReadMany(0x01, 6)]
        );
    }

    #[test]
    fn event_reads_propagate_transport_errors() {
        let init_len = expected_init_log(1).len();

        let mut device = active_driver(MockInterface::default().failing_at(init_len));
        assert_eq!(
            device.read_transient_source(),
            Err(Error::Interface(MockError))
        );
        assert_eq!(&device.interface_mut().log()[init_len..], &[Read(0x1E)]);

        let mut device = active_driver(MockInterface::default().failing_at(init_len));
        assert_eq!(device.orientation(), Err(Error::Interface(MockError)));
        assert_eq!(&device.interface_mut().log()[init_len..], &[Read(0x10)]);
        assert_eq!(device.state(), DriverState::Active);
    }

    #[test]
    fn i2c_bus_end_to_end() {
        const ADDR: u8 = 0x1D;
        let write = |reg: u8, value: u8| I2cTransaction::write(ADDR, vec![reg, value]);
        let read = |reg: u8, value: u8| I2cTransaction::write_read(ADDR, vec![reg], vec![value]);

        let expectations = [
            read(0x0D, 0x1A),
            write(0x2B, 0x40),
            read(0x2B, 0x40),
            read(0x2B, 0x00),
            write(0x09, 0x00),
            write(0x2B, 0x02),
            write(0x2A, 0x18),
            write(0x1D, 0x1E),
            write(0x1F, 16),
            write(0x20, 5),
            write(0x2D, 0x20),
            write(0x2E, 0x20),
            write(0x0E, 0x11),
            read(0x2A, 0x18),
            write(0x2A, 0x01),
            write(0x11, 0x40),
            write(0x01, 0x00),
            I2cTransaction::write_read(
                ADDR,
                vec![0x01],
                vec![0x20, 0x00, 0xE0, 0x00, 0x00, 0x00],
            ),
            read(0x10, 0x02),
        ];
        let mock = I2cMock::new(&expectations);
        let mut device = Mma8451::new_i2c(mock, DeviceAddress::Primary, Config::default());

        device.init(&mut MockDelay::default()).unwrap();
        let g = device.acceleration(Unit::G).unwrap();
        assert_eq!((g.x, g.y, g.z), (1.0, -1.0, 0.0));
        assert_eq!(device.orientation().unwrap(), 0x02);

        let (mut i2c, _) = device.release_i2c();
        i2c.done();
    }
}
