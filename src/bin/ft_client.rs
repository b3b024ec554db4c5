//! ft-client - companion client for ft-server.
//!
//! Speaks the two-channel protocol from the receiving side: binds the local
//! data port first, sends one command over the control connection, accepts
//! the server's inbound data connection, and reads the payload until the
//! server closes it. Status lines go to stderr; a listing goes to stdout
//! and a fetched file goes to disk.

use clap::{ArgGroup, Parser};
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

/// Bound on waiting for the server's data connection or a control reply.
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Parser)]
#[command(
    name = "ft-client",
    version,
    about = "Client for the ft-server two-channel file transfer protocol",
    group = ArgGroup::new("operation").required(true).args(["list", "get"])
)]
struct Cli {
    /// Server host name or address.
    host: String,

    /// Server control port.
    #[arg(value_parser = clap::value_parser!(u16).range(1024..=65535))]
    control_port: u16,

    /// Local port the server streams the payload back to.
    #[arg(value_parser = clap::value_parser!(u16).range(1024..=65535))]
    data_port: u16,

    /// Request the directory listing.
    #[arg(short = 'l')]
    list: bool,

    /// Request the named file.
    #[arg(short = 'g', value_name = "FILENAME")]
    get: Option<String>,

    /// Where to write the fetched file (defaults to the requested name).
    #[arg(short = 'o', value_name = "PATH", requires = "get")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ft-client: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Refuse to clobber an existing file before anything touches the network.
    let output_path = cli
        .get
        .as_ref()
        .map(|name| cli.output.clone().unwrap_or_else(|| PathBuf::from(name)));
    if let Some(path) = &output_path {
        if path.exists() {
            return Err(format!("refusing to overwrite {}", path.display()).into());
        }
    }

    // The data listener must exist before the command goes out; the server
    // connects back as soon as it has acknowledged.
    let data_listener = TcpListener::bind(("0.0.0.0", cli.data_port)).await?;

    let control = TcpStream::connect((cli.host.as_str(), cli.control_port)).await?;
    let (read_half, mut write_half) = control.into_split();
    let mut control_reader = BufReader::new(read_half);

    let command = match &cli.get {
        Some(filename) => format!("{} -g {}\n", cli.data_port, filename),
        None => format!("{} -l\n", cli.data_port),
    };
    write_half.write_all(command.as_bytes()).await?;

    // First reply: the acknowledgment, or an outright rejection.
    let reply = read_reply(&mut control_reader, REPLY_TIMEOUT).await?;
    eprintln!("{}", reply);
    if !reply.starts_with("ACK") {
        return Ok(ExitCode::FAILURE);
    }

    // The payload arrives on the data connection and ends when the server
    // closes it.
    let mut data_stream = match timeout(REPLY_TIMEOUT, data_listener.accept()).await {
        Ok(accepted) => accepted?.0,
        Err(_) => {
            // A server that could not connect back reports why on the
            // control channel; relay that over a bare timeout if we can.
            let status = read_reply(&mut control_reader, Duration::from_secs(1))
                .await
                .unwrap_or_else(|_| {
                    "timed out waiting for the server's data connection".to_string()
                });
            eprintln!("{}", status);
            return Ok(ExitCode::FAILURE);
        }
    };
    let mut payload = Vec::new();
    timeout(REPLY_TIMEOUT, data_stream.read_to_end(&mut payload)).await??;

    let status = read_reply(&mut control_reader, REPLY_TIMEOUT).await?;
    eprintln!("{}", status);
    if !status.starts_with("OK") {
        return Ok(ExitCode::FAILURE);
    }

    match output_path {
        Some(path) => {
            let mut file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await?;
            file.write_all(&payload).await?;
            file.flush().await?;
            eprintln!("wrote {} ({} bytes)", path.display(), payload.len());
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(&payload)?;
            stdout.flush()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads one status line from the control channel, without the terminator.
async fn read_reply(
    reader: &mut BufReader<OwnedReadHalf>,
    wait: Duration,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut line = String::new();
    let n = timeout(wait, reader.read_line(&mut line))
        .await
        .map_err(|_| "timed out waiting for a server reply")??;
    if n == 0 {
        return Err("server closed the control connection".into());
    }
    Ok(line.trim_end().to_string())
}
