//! Feature report transport abstraction.
//!
//! Opening the hidraw node and the actual ioctl live with the caller; the
//! core only needs something that can take one report at a time.

use crate::error::Result;
use crate::protocol::{self, Command};
use tracing::{debug, trace};

/// Abstraction over a raw HID feature report write.
pub trait FeatureReportTransport {
    /// Send one feature report to the device.
    fn send_feature_report(&self, data: &[u8]) -> Result<()>;
}

/// Send `commands` in order, then the commit report if `commit` is set.
///
/// Stops at the first failed write; nothing is retried.
pub fn apply_commands(
    transport: &dyn FeatureReportTransport,
    commands: &[Command],
    commit: bool,
) -> Result<usize> {
    let mut sent = 0;
    for command in commands {
        send_command(transport, command)?;
        sent += 1;
    }
    if commit {
        send_command(transport, &protocol::commit())?;
        sent += 1;
    }
    debug!(sent, commit, "Applied feature reports");
    Ok(sent)
}

fn send_command(transport: &dyn FeatureReportTransport, command: &Command) -> Result<()> {
    trace!(
        opcode = format_args!("0x{:02X}", command.opcode().unwrap_or_default()),
        len = command.len(),
        report_hex = format_args!("{:02X?}", command.as_bytes()),
        "Feature report TX"
    );
    transport.send_feature_report(command.as_bytes())
}

/// A mock transport for testing.
///
/// Records every report written and can be told to fail after N writes.
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    pub struct MockTransport {
        sent: Mutex<Vec<Vec<u8>>>,
        fail_after: Option<usize>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_after: None,
            }
        }

        /// Accept `n` writes, then fail every following one.
        pub fn failing_after(n: usize) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_after: Some(n),
            }
        }

        /// Reports written so far.
        pub fn sent(&self) -> Vec<Vec<u8>> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl FeatureReportTransport for MockTransport {
        fn send_feature_report(&self, data: &[u8]) -> Result<()> {
            let mut sent = self.sent.lock().unwrap();
            if self.fail_after.is_some_and(|n| sent.len() >= n) {
                return Err(Error::Hid(format!(
                    "mock: write rejected for report {:02X?}",
                    data
                )));
            }
            sent.push(data.to_vec());
            Ok(())
        }
    }
}
