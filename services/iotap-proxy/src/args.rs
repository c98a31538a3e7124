use std::path::PathBuf;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub listen: Option<String>,
    pub upstream: Option<String>,
    pub json: bool,
    pub version_json: bool,
    pub help: bool,
}

pub fn parse<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--listen" | "-l" => parsed.listen = Some(value(&mut args, &arg)?),
            "--upstream" | "-u" => parsed.upstream = Some(value(&mut args, &arg)?),
            "--json" => parsed.json = true,
            "--version-json" => parsed.version_json = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(parsed)
}

fn value<I>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .filter(|v| !v.starts_with('-'))
        .ok_or_else(|| format!("Missing value for {}", flag))
}

pub fn print_usage() {
    println!("iotap-proxy - TCP proxy that traces every read and write");
    println!();
    println!("USAGE:");
    println!("    iotap-proxy [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>       TOML configuration file");
    println!("    -l, --listen <ADDR>       Address to accept clients on");
    println!("    -u, --upstream <ADDR>     Address to relay clients to");
    println!("        --json                Emit logs as JSON");
    println!("        --version-json        Print version information as JSON and exit");
    println!("    -h, --help                Print this help");
    println!();
    println!("Chunk dumps are logged at DEBUG on target iotap::trace, e.g.");
    println!("    RUST_LOG=info,iotap::trace=debug iotap-proxy -u 127.0.0.1:6379");
}
