//! Control-channel status messages
//!
//! Every reply the server writes on the control channel is built here, so
//! the one-line, prefix-tagged scheme stays in one place: `ACK` before a
//! data connection is attempted, then exactly one `OK` or `ERR` line closing
//! the exchange.

use crate::error::RequestError;
use crate::protocol::request::{DATA_PORT_MIN, Operation, Request};

/// Usage string sent back for malformed commands.
pub const USAGE: &str = "USAGE: <data port> -l/-g [file]";

/// Pre-transfer acknowledgment.
///
/// Names the port the data connection is about to target (and the file for a
/// Get) so the client knows to expect the inbound connection.
pub fn acknowledgment(request: &Request) -> String {
    match &request.operation {
        Operation::List => format!(
            "ACK sending directory listing to port {}\n",
            request.data_port
        ),
        Operation::Get(filename) => {
            format!("ACK sending {} to port {}\n", filename, request.data_port)
        }
    }
}

/// The single success line closing an exchange.
pub fn success(bytes: u64) -> String {
    format!("OK {} bytes sent\n", bytes)
}

/// The single failure line closing an exchange.
pub fn failure(error: &RequestError) -> String {
    match error {
        RequestError::BadCommand(_) => format!("ERR invalid command. {}\n", USAGE),
        RequestError::BadPort(token) => format!(
            "ERR invalid data port '{}': expected a port in [{}, 65535]\n",
            token, DATA_PORT_MIN
        ),
        RequestError::NotFound(filename) => format!("ERR file not found: {}\n", filename),
        RequestError::DataConnectFailed(e) => {
            format!("ERR cannot open data connection to {}\n", e.addr())
        }
        RequestError::Io(e) => format!("ERR transfer failed: {}\n", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataChannelError;
    use std::io;

    fn assert_single_line(msg: &str) {
        assert!(msg.ends_with('\n'), "not newline terminated: {:?}", msg);
        assert_eq!(msg.matches('\n').count(), 1, "not one line: {:?}", msg);
    }

    #[test]
    fn test_acknowledgment_names_port_and_file() {
        let list = acknowledgment(&Request {
            data_port: 3000,
            operation: Operation::List,
        });
        assert!(list.starts_with("ACK"));
        assert!(list.contains("3000"));
        assert_single_line(&list);

        let get = acknowledgment(&Request {
            data_port: 4021,
            operation: Operation::Get("notes.txt".to_string()),
        });
        assert!(get.starts_with("ACK"));
        assert!(get.contains("notes.txt"));
        assert!(get.contains("4021"));
        assert_single_line(&get);
    }

    #[test]
    fn test_success_carries_byte_count() {
        let msg = success(1234);
        assert!(msg.starts_with("OK"));
        assert!(msg.contains("1234"));
        assert_single_line(&msg);
    }

    #[test]
    fn test_failures_are_tagged_and_distinguishable() {
        let bad_command = failure(&RequestError::BadCommand("too many tokens".into()));
        assert!(bad_command.contains(USAGE));

        let bad_port = failure(&RequestError::BadPort("99".into()));
        assert!(bad_port.contains("'99'"));

        let not_found = failure(&RequestError::NotFound("ghost.txt".into()));
        assert!(not_found.contains("ghost.txt"));

        let addr = "127.0.0.1:4000".parse().unwrap();
        let connect = failure(&RequestError::DataConnectFailed(DataChannelError::Timeout(
            addr,
        )));
        assert!(connect.contains("127.0.0.1:4000"));

        let io = failure(&RequestError::Io(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "broken pipe",
        )));

        for msg in [bad_command, bad_port, not_found, connect, io] {
            assert!(msg.starts_with("ERR"), "not tagged as failure: {:?}", msg);
            assert_single_line(&msg);
        }
    }
}
